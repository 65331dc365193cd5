//! 主机地址方案
//!
//! 主机 id 到 MAC / IPv4 地址的确定性映射。地址固定前缀，最后两个字节是
//! 大端序的主机 id，因此 id <= 255 时与 `00:00:0a:00:00:%02x` 完全一致。
//! `HostId` 是 16 位的，映射在全部取值 `[1, 65535]` 上单射且保序。

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use super::id::HostId;

/// 主机 MAC 地址的固定前缀
pub const HOST_MAC_PREFIX: [u8; 4] = [0x00, 0x00, 0x0a, 0x00];

/// 48 位 MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// 若地址带主机前缀，则反解出主机 id
    pub fn host_id(self) -> Option<HostId> {
        if self.0[..4] != HOST_MAC_PREFIX {
            return None;
        }
        let id = u16::from_be_bytes([self.0[4], self.0[5]]);
        (id != 0).then_some(HostId(id))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// MAC 地址解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid MAC address {0:?}")]
pub struct ParseMacError(pub String);

impl FromStr for MacAddr {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 6];
        let mut parts = s.split(':');
        for byte in out.iter_mut() {
            let part = parts.next().ok_or_else(|| ParseMacError(s.to_string()))?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseMacError(s.to_string()));
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| ParseMacError(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseMacError(s.to_string()));
        }
        Ok(MacAddr(out))
    }
}

/// 主机 id -> MAC 地址
pub fn host_mac(id: HostId) -> MacAddr {
    let [hi, lo] = id.0.to_be_bytes();
    let p = HOST_MAC_PREFIX;
    MacAddr([p[0], p[1], p[2], p[3], hi, lo])
}

/// 主机 id -> IPv4 地址（`10.0.X.Y`）
pub fn host_ip(id: HostId) -> Ipv4Addr {
    let [hi, lo] = id.0.to_be_bytes();
    Ipv4Addr::new(10, 0, hi, lo)
}
