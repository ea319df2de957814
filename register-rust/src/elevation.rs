use anyhow::Result;

/// Whether the current process holds administrator rights. Answers false on
/// anything that is not an elevated Windows process; never fails.
#[cfg(windows)]
pub fn is_admin() -> bool {
    use windows_sys::Win32::UI::Shell::IsUserAnAdmin;
    unsafe { IsUserAnAdmin() != 0 }
}

#[cfg(not(windows))]
pub fn is_admin() -> bool {
    false
}

/// Relaunches the current executable through the shell with the `runas`
/// verb, forwarding arguments. The caller is expected to exit afterwards.
#[cfg(windows)]
pub fn relaunch_elevated() -> Result<()> {
    use anyhow::{bail, Context};
    use windows_sys::Win32::UI::Shell::ShellExecuteW;
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    let exe = std::env::current_exe().context("resolve current exe")?;
    let args = std::env::args()
        .skip(1)
        .map(|arg| quote_arg(&arg))
        .collect::<Vec<_>>()
        .join(" ");

    let verb = to_wide("runas");
    let exe_w = to_wide(&exe.display().to_string());
    let args_w = to_wide(&args);

    let result = unsafe {
        ShellExecuteW(
            0,
            verb.as_ptr(),
            exe_w.as_ptr(),
            if args.is_empty() {
                std::ptr::null()
            } else {
                args_w.as_ptr()
            },
            std::ptr::null(),
            SW_SHOWNORMAL,
        )
    };

    // Values at or below 32 are ShellExecute error codes.
    if result <= 32 {
        bail!("ShellExecuteW failed with code {result}");
    }
    Ok(())
}

#[cfg(not(windows))]
pub fn relaunch_elevated() -> Result<()> {
    anyhow::bail!("elevation is only supported on Windows")
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(any(windows, test))]
fn quote_arg(arg: &str) -> String {
    if arg.contains(' ') || arg.contains('"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_admin_never_panics() {
        // Answer varies by platform and session; it only has to be a bool.
        let _: bool = is_admin();
    }

    #[test]
    fn quote_arg_wraps_spaces() {
        assert_eq!(quote_arg("plain"), "plain");
        assert_eq!(quote_arg("has space"), "\"has space\"");
        assert_eq!(quote_arg("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
