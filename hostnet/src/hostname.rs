//! # Host Names
//!
//! Splits fully qualified domain names and reads the system host name.

use std::ffi::CStr;
use std::io;

/// Buffer size for `gethostname`, `_POSIX_HOST_NAME_MAX` rounded up.
const HOST_NAME_MAX: usize = 256;

/// Returns the part of `fqdn` before the first dot, or all of it if there is none.
pub fn hostname_from_fqdn(fqdn: &str) -> &str {
    match fqdn.split_once('.') {
        Some((host, _)) => host,
        None => fqdn,
    }
}

/// Returns the part of `fqdn` after the first dot, or `""` if there is none.
pub fn domain_name_from_fqdn(fqdn: &str) -> &str {
    match fqdn.split_once('.') {
        Some((_, domain)) => domain,
        None => "",
    }
}

/// The host name as reported by `gethostname(2)`, or `""` if the call fails.
pub fn fqdn() -> String {
    match system_hostname() {
        Ok(name) => name,
        Err(e) => {
            log::warn!("gethostname failed: {e}");
            String::new()
        }
    }
}

/// Same as `fqdn()`.
pub fn full_hostname() -> String {
    fqdn()
}

/// The host name without its domain.
pub fn hostname() -> String {
    hostname_from_fqdn(&fqdn()).to_string()
}

/// The domain part of the host name.
pub fn domain_name() -> String {
    domain_name_from_fqdn(&fqdn()).to_string()
}

fn system_hostname() -> Result<String, io::Error> {
    let mut buf = [0u8; HOST_NAME_MAX + 1];
    // gethostname may leave the result unterminated when it truncates,
    // the last byte is kept as a terminator
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, HOST_NAME_MAX) };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    let name = CStr::from_bytes_until_nul(&buf)
        .map_err(|_| io::Error::from(io::ErrorKind::InvalidData))?;
    Ok(name.to_string_lossy().into_owned())
}
