//! Host name translation for the host column (`--dns` / `--ip`).
//!
//! Lookups that fail leave the stored string untouched.

use std::net::{IpAddr, ToSocketAddrs};

use tracing::debug;

/// Name service used for host translation.
pub trait HostResolver {
    /// Reverse lookup: address to host name.
    fn reverse(&self, addr: IpAddr) -> Option<String>;

    /// Forward lookup: host name to its first address.
    fn forward(&self, name: &str) -> Option<IpAddr>;
}

/// Which way, if any, hosts are translated before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostMapping {
    #[default]
    None,
    /// Translate IP addresses into host names.
    Dns,
    /// Translate host names into IP addresses.
    Ip,
}

/// Applies a [`HostMapping`] using some [`HostResolver`].
pub struct HostTranslator {
    mapping: HostMapping,
    resolver: Box<dyn HostResolver>,
}

impl HostTranslator {
    pub fn new(mapping: HostMapping, resolver: Box<dyn HostResolver>) -> Self {
        Self { mapping, resolver }
    }

    /// A translator that never changes anything.
    pub fn disabled() -> Self {
        Self::new(HostMapping::None, Box::new(SystemResolver))
    }

    pub fn translate(&self, host: &str) -> String {
        if host.is_empty() {
            return String::new();
        }
        let translated = match self.mapping {
            HostMapping::None => None,
            HostMapping::Dns => host
                .parse::<IpAddr>()
                .ok()
                .and_then(|addr| self.resolver.reverse(addr)),
            HostMapping::Ip => self.resolver.forward(host).map(|addr| addr.to_string()),
        };
        match translated {
            Some(name) => name,
            None => {
                if self.mapping != HostMapping::None {
                    debug!(host, "host translation failed, keeping original");
                }
                host.to_string()
            }
        }
    }
}

/// The operating system's resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn reverse(&self, addr: IpAddr) -> Option<String> {
        name_info(addr)
    }

    fn forward(&self, name: &str) -> Option<IpAddr> {
        (name, 0)
            .to_socket_addrs()
            .ok()?
            .next()
            .map(|socket| socket.ip())
    }
}

const NI_MAXHOST: usize = 1025;

/// Reverse lookup through `getnameinfo(3)`, requiring a real name.
#[cfg(unix)]
fn name_info(addr: IpAddr) -> Option<String> {
    use std::ffi::CStr;
    use std::mem;

    // SAFETY: sockaddr_storage is plain old data; all-zero is a valid value.
    let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
    let len = match addr {
        IpAddr::V4(v4) => {
            // SAFETY: sockaddr_storage is large and aligned enough for sockaddr_in.
            let sin = unsafe {
                &mut *(&mut storage as *mut libc::sockaddr_storage as *mut libc::sockaddr_in)
            };
            sin.sin_family = libc::AF_INET as libc::sa_family_t;
            sin.sin_addr.s_addr = u32::from_ne_bytes(v4.octets());
            #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
            {
                sin.sin_len = mem::size_of::<libc::sockaddr_in>() as u8;
            }
            mem::size_of::<libc::sockaddr_in>()
        }
        IpAddr::V6(v6) => {
            // SAFETY: sockaddr_storage is large and aligned enough for sockaddr_in6.
            let sin6 = unsafe {
                &mut *(&mut storage as *mut libc::sockaddr_storage as *mut libc::sockaddr_in6)
            };
            sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
            sin6.sin6_addr.s6_addr = v6.octets();
            #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
            {
                sin6.sin6_len = mem::size_of::<libc::sockaddr_in6>() as u8;
            }
            mem::size_of::<libc::sockaddr_in6>()
        }
    };

    let mut host = [0 as libc::c_char; NI_MAXHOST];
    // SAFETY: storage holds an initialised address of `len` bytes, host is a
    // writable buffer of the advertised size and no service buffer is requested.
    let ret = unsafe {
        libc::getnameinfo(
            &storage as *const libc::sockaddr_storage as *const libc::sockaddr,
            len as libc::socklen_t,
            host.as_mut_ptr(),
            host.len() as libc::socklen_t,
            std::ptr::null_mut(),
            0,
            libc::NI_NAMEREQD,
        )
    };
    if ret != 0 {
        return None;
    }
    // SAFETY: getnameinfo NUL-terminates the host buffer on success.
    let name = unsafe { CStr::from_ptr(host.as_ptr()) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn name_info(_addr: IpAddr) -> Option<String> {
    None
}
