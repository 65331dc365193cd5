//! 交换机名称解码表
//!
//! 名称由一个角色/层符号加上从 1 开始的序号组成，例如 `b2`、`t7`。
//! 每种拓扑形状给出一张声明式的符号表，解码时只查表，不按层数分支。

use crate::error::RouteError;

/// 交换机在拓扑中的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchClass {
    /// 二叉树第 n 层（0 为根）
    Layer(u32),
    /// fat-tree 接入层（ToR）
    Edge,
    /// fat-tree 汇聚层
    Aggregation,
    /// fat-tree 核心层
    Core,
}

/// 符号表中的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRule {
    pub symbol: char,
    pub class: SwitchClass,
    /// 该类别下的交换机数量，合法序号为 `1..=count`
    pub count: usize,
}

/// 某一拓扑形状下的交换机名称表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    rules: Vec<NameRule>,
}

impl NameTable {
    pub fn new(rules: Vec<NameRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[NameRule] {
        &self.rules
    }

    pub fn rule_for(&self, class: SwitchClass) -> Option<&NameRule> {
        self.rules.iter().find(|r| r.class == class)
    }

    /// 解码交换机名称，返回类别与从 0 开始的序号
    pub fn decode(&self, name: &str) -> Result<(SwitchClass, usize), RouteError> {
        let mut chars = name.chars();
        let symbol = chars
            .next()
            .ok_or_else(|| RouteError::invalid(name, "empty name"))?;
        let rule = self
            .rules
            .iter()
            .find(|r| r.symbol == symbol)
            .ok_or_else(|| RouteError::invalid(name, format!("unknown symbol {symbol:?}")))?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RouteError::invalid(name, "malformed ordinal"));
        }
        let ordinal: usize = digits
            .parse()
            .map_err(|_| RouteError::invalid(name, "malformed ordinal"))?;
        if ordinal == 0 || ordinal > rule.count {
            return Err(RouteError::invalid(
                name,
                format!("ordinal {ordinal} out of range 1..={}", rule.count),
            ));
        }
        Ok((rule.class, ordinal - 1))
    }

    /// 生成某类别下第 `index`（从 0 开始）台交换机的名称
    pub fn encode(&self, class: SwitchClass, index: usize) -> Option<String> {
        let rule = self.rule_for(class)?;
        (index < rule.count).then(|| format!("{}{}", rule.symbol, index + 1))
    }

    /// 按表顺序列出全部交换机名称
    pub fn switch_names(&self) -> impl Iterator<Item = String> + '_ {
        self.rules
            .iter()
            .flat_map(|r| (1..=r.count).map(move |i| format!("{}{}", r.symbol, i)))
    }

    /// 交换机总数
    pub fn switch_count(&self) -> usize {
        self.rules.iter().map(|r| r.count).sum()
    }
}
