use anyhow::Result;
use dymatic_register::{elevation, installer, paths};

fn main() -> Result<()> {
    if !elevation::is_admin() {
        // The elevated copy does the actual work.
        return elevation::relaunch_elevated();
    }

    let root = paths::root_dir()?;
    installer::run_from_args(&root)
}
