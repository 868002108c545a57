//! Direct host queries for resource and platform checks.
//!
//! Memory and disk checks do not shell out; they ask the OS directly.
//! Every query degrades gracefully: a platform where a quantity cannot be
//! read returns `None`, and the engine reports that as informational
//! rather than failing the check.

use std::path::Path;

/// Bytes per gigabyte, the unit all thresholds are expressed in.
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// The seam between the validation engine and platform queries.
pub trait HostInspector {
    /// Kernel/OS name, e.g. "Linux", "Darwin", "Windows".
    fn os_name(&self) -> String;

    /// OS release string, e.g. "6.1.0-13-amd64".
    fn os_release(&self) -> String;

    /// Machine architecture, e.g. "x86_64", "aarch64".
    fn architecture(&self) -> String;

    /// Total physical memory, if the platform exposes it.
    fn total_memory_bytes(&self) -> Option<u64>;

    /// Free disk space on the filesystem containing `path`.
    fn free_disk_bytes(&self, path: &Path) -> Option<u64>;
}

/// Inspects the real host.
#[derive(Debug, Default)]
pub struct SystemHost;

impl HostInspector for SystemHost {
    fn os_name(&self) -> String {
        match uname() {
            Some(u) => u.sysname,
            None => fallback_os_name(),
        }
    }

    fn os_release(&self) -> String {
        match uname() {
            Some(u) => u.release,
            None => "unknown".to_string(),
        }
    }

    fn architecture(&self) -> String {
        match uname() {
            Some(u) => u.machine,
            None => std::env::consts::ARCH.to_string(),
        }
    }

    fn total_memory_bytes(&self) -> Option<u64> {
        physical_memory_bytes()
    }

    fn free_disk_bytes(&self, path: &Path) -> Option<u64> {
        filesystem_free_bytes(path)
    }
}

/// Capitalized OS name for platforms without uname.
fn fallback_os_name() -> String {
    match std::env::consts::OS {
        "windows" => "Windows".to_string(),
        "macos" => "Darwin".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => "unknown".to_string(),
            }
        }
    }
}

/// Fields of interest from `uname(2)`.
struct Uname {
    sysname: String,
    release: String,
    machine: String,
}

#[cfg(unix)]
fn uname() -> Option<Uname> {
    use std::ffi::CStr;

    let mut buf: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut buf) } != 0 {
        return None;
    }

    fn field(chars: &[libc::c_char]) -> String {
        unsafe { CStr::from_ptr(chars.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    Some(Uname {
        sysname: field(&buf.sysname),
        release: field(&buf.release),
        machine: field(&buf.machine),
    })
}

#[cfg(not(unix))]
fn uname() -> Option<Uname> {
    None
}

#[cfg(unix)]
fn physical_memory_bytes() -> Option<u64> {
    let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };
    if pages > 0 && page_size > 0 {
        Some(pages as u64 * page_size as u64)
    } else {
        None
    }
}

#[cfg(not(unix))]
fn physical_memory_bytes() -> Option<u64> {
    None
}

#[cfg(unix)]
fn filesystem_free_bytes(path: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } == 0 {
        // f_bavail counts blocks available to unprivileged users, matching
        // what a developer actually has to work with.
        Some(stat.f_bavail as u64 * stat.f_frsize as u64)
    } else {
        None
    }
}

#[cfg(not(unix))]
fn filesystem_free_bytes(_path: &Path) -> Option<u64> {
    None
}
