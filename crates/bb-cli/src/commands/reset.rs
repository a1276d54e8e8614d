use std::fs;
use std::path::Path;

pub fn run(profile_path: &Path, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("refusing to delete the profile without --yes".to_string());
    }

    if !profile_path.exists() {
        println!("  No profile at {}.", profile_path.display());
        return Ok(());
    }

    fs::remove_file(profile_path).map_err(|e| format!("cannot delete profile: {e}"))?;
    println!("  Profile {} deleted.", profile_path.display());
    Ok(())
}
