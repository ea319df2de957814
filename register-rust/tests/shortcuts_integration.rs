#![cfg(windows)]

use std::fs;

use dymatic_register::shortcuts;

#[test]
fn create_shortcut_writes_lnk_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("Programs");
    let target = tmp.path().join("DymaticEditor.exe");
    let working_dir = tmp.path().join("DymaticEditor");
    fs::write(&target, "binary").unwrap();
    fs::create_dir_all(&working_dir).unwrap();

    let lnk = shortcuts::create_shortcut(
        &dir,
        "Dymatic Engine",
        &target,
        &working_dir,
        None,
    )
    .unwrap();

    assert!(lnk.exists());
}
