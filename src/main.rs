use anyhow::Result;

fn main() -> Result<()> {
    solreg::run()?;
    Ok(())
}
