//! 等价多路径（ECMP）上行端口选择
//!
//! fat-tree 的 ToR 和汇聚交换机各有 `k/2` 个等价上行端口。选择只依赖目的主机，
//! 同一目的地从同一交换机出发总是走同一上行口，不同目的地分散到各上行口。

/// 上行口选择策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UplinkPolicy {
    /// ToR 取 `dst mod k/2`，汇聚取 `(dst div k/2) mod k/2`，两层组合覆盖全部核心
    #[default]
    DestinationModulo,
    /// 对目的主机下标做 splitmix64，按层加盐
    DestinationHash,
}

/// 需要选择上行口的层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UplinkTier {
    Edge,
    Aggregation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UplinkSelector {
    policy: UplinkPolicy,
    /// 用于 ECMP hashing 的盐（保证稳定且可控）
    hash_salt: u64,
}

impl Default for UplinkSelector {
    fn default() -> Self {
        Self::new(UplinkPolicy::default(), 0)
    }
}

impl UplinkSelector {
    pub fn new(policy: UplinkPolicy, hash_salt: u64) -> Self {
        Self { policy, hash_salt }
    }

    pub fn policy(&self) -> UplinkPolicy {
        self.policy
    }

    /// 为目的主机（从 0 开始的下标）选择 `[0, width)` 内的上行口序号
    pub fn pick(&self, tier: UplinkTier, dst: usize, width: usize) -> usize {
        debug_assert!(width > 0);
        match self.policy {
            UplinkPolicy::DestinationModulo => match tier {
                UplinkTier::Edge => dst % width,
                UplinkTier::Aggregation => (dst / width) % width,
            },
            UplinkPolicy::DestinationHash => {
                let tier_salt: u64 = match tier {
                    UplinkTier::Edge => 0,
                    UplinkTier::Aggregation => 0x9E3779B97F4A7C15,
                };
                let h = mix64((dst as u64) ^ tier_salt ^ self.hash_salt);
                (h % width as u64) as usize
            }
        }
    }
}

/// 一个简单、确定性的 64-bit mixing（替代 RandomState，避免每次运行 hash 不稳定）。
fn mix64(mut x: u64) -> u64 {
    // splitmix64
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
