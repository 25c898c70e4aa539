use anyhow::Result;

use crate::printing::print_regions;

pub fn list_regions() -> Result<()> {
    print_regions();
    Ok(())
}
