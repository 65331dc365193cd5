//! 表项下发
//!
//! [`TableInstaller`] 对应一台交换机的控制面句柄。`CliScriptInstaller` 把命令写成
//! `simple_switch_CLI` 脚本，`RecordingInstaller` 在内存中记录并按表结构校验。

use std::fmt;
use std::io::Write;

use crate::error::InstallError;

/// 一台交换机的控制面句柄
pub trait TableInstaller {
    /// 交换机名称
    fn switch(&self) -> &str;

    /// 清空交换机上已有的表项与状态
    fn reset_state(&mut self) -> Result<(), InstallError>;

    /// 设置表的默认动作
    fn table_set_default(
        &mut self,
        table: &str,
        action: &str,
        params: &[String],
    ) -> Result<(), InstallError>;

    /// 添加一条表项
    fn table_add(
        &mut self,
        table: &str,
        action: &str,
        match_keys: &[String],
        params: &[String],
    ) -> Result<(), InstallError>;
}

/// 一条控制面命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallCommand {
    Reset,
    SetDefault {
        table: String,
        action: String,
        params: Vec<String>,
    },
    Add {
        table: String,
        action: String,
        match_keys: Vec<String>,
        params: Vec<String>,
    },
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallCommand::Reset => write!(f, "reset_state"),
            InstallCommand::SetDefault {
                table,
                action,
                params,
            } => {
                write!(f, "table_set_default {table} {action}")?;
                for p in params {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            InstallCommand::Add {
                table,
                action,
                match_keys,
                params,
            } => {
                write!(f, "table_add {table} {action}")?;
                for k in match_keys {
                    write!(f, " {k}")?;
                }
                write!(f, " =>")?;
                for p in params {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
        }
    }
}

/// 把命令逐行写入任意 writer
#[derive(Debug)]
pub struct CliScriptInstaller<W: Write> {
    switch: String,
    out: W,
}

impl<W: Write> CliScriptInstaller<W> {
    pub fn new(switch: impl Into<String>, out: W) -> Self {
        Self {
            switch: switch.into(),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, cmd: InstallCommand) -> Result<(), InstallError> {
        writeln!(self.out, "{cmd}")?;
        Ok(())
    }
}

impl<W: Write> TableInstaller for CliScriptInstaller<W> {
    fn switch(&self) -> &str {
        &self.switch
    }

    fn reset_state(&mut self) -> Result<(), InstallError> {
        self.emit(InstallCommand::Reset)
    }

    fn table_set_default(
        &mut self,
        table: &str,
        action: &str,
        params: &[String],
    ) -> Result<(), InstallError> {
        self.emit(InstallCommand::SetDefault {
            table: table.to_string(),
            action: action.to_string(),
            params: params.to_vec(),
        })
    }

    fn table_add(
        &mut self,
        table: &str,
        action: &str,
        match_keys: &[String],
        params: &[String],
    ) -> Result<(), InstallError> {
        self.emit(InstallCommand::Add {
            table: table.to_string(),
            action: action.to_string(),
            match_keys: match_keys.to_vec(),
            params: params.to_vec(),
        })
    }
}

/// P4 程序中的一张表及其允许的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: String,
    pub actions: Vec<String>,
}

impl TableSchema {
    /// `l2fwd.p4` 的 `dmac` 表
    pub fn l2fwd() -> Vec<TableSchema> {
        vec![TableSchema {
            table: "dmac".to_string(),
            actions: vec!["forward".to_string(), "drop".to_string()],
        }]
    }
}

/// 在内存中记录命令；对未知的表或动作返回 `Rejected`
#[derive(Debug, Clone)]
pub struct RecordingInstaller {
    switch: String,
    schema: Vec<TableSchema>,
    pub commands: Vec<InstallCommand>,
}

impl RecordingInstaller {
    pub fn new(switch: impl Into<String>) -> Self {
        Self::with_schema(switch, TableSchema::l2fwd())
    }

    pub fn with_schema(switch: impl Into<String>, schema: Vec<TableSchema>) -> Self {
        Self {
            switch: switch.into(),
            schema,
            commands: Vec::new(),
        }
    }

    /// reset 之后生效的 `(匹配键, 动作参数)` 列表
    pub fn entries(&self, table: &str) -> Vec<(Vec<String>, Vec<String>)> {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == InstallCommand::Reset)
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                InstallCommand::Add {
                    table: t,
                    match_keys,
                    params,
                    ..
                } if t == table => Some((match_keys.clone(), params.clone())),
                _ => None,
            })
            .collect()
    }

    fn check(&self, cmd: &InstallCommand, table: &str, action: &str) -> Result<(), InstallError> {
        let known = self
            .schema
            .iter()
            .find(|s| s.table == table)
            .is_some_and(|s| s.actions.iter().any(|a| a == action));
        if known {
            Ok(())
        } else {
            Err(InstallError::Rejected {
                switch: self.switch.clone(),
                command: cmd.to_string(),
                reason: format!("unknown table/action {table}/{action}"),
            })
        }
    }
}

impl TableInstaller for RecordingInstaller {
    fn switch(&self) -> &str {
        &self.switch
    }

    fn reset_state(&mut self) -> Result<(), InstallError> {
        self.commands.push(InstallCommand::Reset);
        Ok(())
    }

    fn table_set_default(
        &mut self,
        table: &str,
        action: &str,
        params: &[String],
    ) -> Result<(), InstallError> {
        let cmd = InstallCommand::SetDefault {
            table: table.to_string(),
            action: action.to_string(),
            params: params.to_vec(),
        };
        self.check(&cmd, table, action)?;
        self.commands.push(cmd);
        Ok(())
    }

    fn table_add(
        &mut self,
        table: &str,
        action: &str,
        match_keys: &[String],
        params: &[String],
    ) -> Result<(), InstallError> {
        let cmd = InstallCommand::Add {
            table: table.to_string(),
            action: action.to_string(),
            match_keys: match_keys.to_vec(),
            params: params.to_vec(),
        };
        self.check(&cmd, table, action)?;
        self.commands.push(cmd);
        Ok(())
    }
}
