//! 编辑器脚本
//!
//! 每行一条编辑命令，`#` 之后为注释：
//!
//! ```text
//! host
//! switch
//! connect h1 s1
//! select 1
//! bw 20
//! delay 5ms
//! flow h1 h2 8
//! ```

use thiserror::Error;

use super::builder::BuilderCommand;
use super::id::{LinkId, NodeId};
use super::node::{NodeKind, Position};

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },
    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unexpected argument `{arg}`")]
    UnexpectedArgument { line: usize, arg: String },
}

/// 解析整个脚本；任一行出错则整体失败，不产生任何命令
pub fn parse_script(text: &str) -> Result<Vec<BuilderCommand>, ScriptError> {
    let mut cmds = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        cmds.extend(parse_command(idx + 1, raw)?);
    }
    Ok(cmds)
}

/// 解析单行；空行和注释行返回空列表
pub fn parse_command(line: usize, raw: &str) -> Result<Vec<BuilderCommand>, ScriptError> {
    let text = raw.split('#').next().unwrap_or("").trim();
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Vec::new());
    };
    let args: Vec<&str> = words.collect();
    let args = Args {
        line,
        command,
        args: &args,
    };

    let cmds = match command {
        "host" => {
            args.expect_len(0, "no arguments")?;
            vec![BuilderCommand::AddNode {
                node_kind: NodeKind::Host,
            }]
        }
        "switch" => {
            args.expect_len(0, "no arguments")?;
            vec![BuilderCommand::AddNode {
                node_kind: NodeKind::Switch,
            }]
        }
        "connect" => {
            args.expect_len(2, "<src> <dst>")?;
            vec![BuilderCommand::Connect {
                src: NodeId::from(args.args[0]),
                dst: NodeId::from(args.args[1]),
            }]
        }
        "select" => {
            args.expect_len(1, "<link>")?;
            let link = args.args[0]
                .parse::<usize>()
                .map_err(|_| args.invalid_number(0))?;
            vec![BuilderCommand::SelectLink { link: LinkId(link) }]
        }
        "bw" => {
            args.expect_len(1, "<mbps>")?;
            vec![BuilderCommand::SetBandwidth {
                mbps: args.number(0)?,
            }]
        }
        "delay" => {
            args.expect_len(1, "<delay>")?;
            vec![BuilderCommand::SetDelay {
                delay: args.args[0].to_string(),
            }]
        }
        "flow" => parse_flow(&args)?,
        "rate" => {
            args.expect_len(1, "<mbps>")?;
            vec![BuilderCommand::SetFlowRate {
                mbps: args.number(0)?,
            }]
        }
        "move" => {
            args.expect_len(3, "<node> <x> <y>")?;
            vec![BuilderCommand::MoveNode {
                id: NodeId::from(args.args[0]),
                position: Position {
                    x: args.number(1)?,
                    y: args.number(2)?,
                },
            }]
        }
        "remove-node" => {
            args.expect_len(1, "<node>")?;
            vec![BuilderCommand::RemoveNode {
                id: NodeId::from(args.args[0]),
            }]
        }
        "remove-link" => {
            args.expect_len(1, "<link>")?;
            let link = args.args[0]
                .parse::<usize>()
                .map_err(|_| args.invalid_number(0))?;
            vec![BuilderCommand::RemoveLink { link: LinkId(link) }]
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(cmds)
}

// `flow auto` 清空 src/dst；`flow <src> <dst> [rate]` 设置显式流
fn parse_flow(args: &Args<'_>) -> Result<Vec<BuilderCommand>, ScriptError> {
    match args.args {
        ["auto"] => Ok(vec![
            BuilderCommand::SetFlowSource { src: String::new() },
            BuilderCommand::SetFlowDestination { dst: String::new() },
        ]),
        [src, dst] | [src, dst, _] => {
            let mut cmds = vec![
                BuilderCommand::SetFlowSource {
                    src: src.to_string(),
                },
                BuilderCommand::SetFlowDestination {
                    dst: dst.to_string(),
                },
            ];
            if args.args.len() == 3 {
                cmds.push(BuilderCommand::SetFlowRate {
                    mbps: args.number(2)?,
                });
            }
            Ok(cmds)
        }
        [] | [_] => Err(args.missing("auto | <src> <dst> [rate]")),
        [_, _, _, extra, ..] => Err(ScriptError::UnexpectedArgument {
            line: args.line,
            arg: extra.to_string(),
        }),
    }
}

struct Args<'a> {
    line: usize,
    command: &'a str,
    args: &'a [&'a str],
}

impl Args<'_> {
    fn expect_len(&self, n: usize, expected: &'static str) -> Result<(), ScriptError> {
        if self.args.len() < n {
            return Err(self.missing(expected));
        }
        if let Some(extra) = self.args.get(n) {
            return Err(ScriptError::UnexpectedArgument {
                line: self.line,
                arg: extra.to_string(),
            });
        }
        Ok(())
    }

    fn missing(&self, expected: &'static str) -> ScriptError {
        ScriptError::MissingArgument {
            line: self.line,
            command: self.command.to_string(),
            expected,
        }
    }

    fn number(&self, idx: usize) -> Result<f64, ScriptError> {
        self.args[idx]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid_number(idx))
    }

    fn invalid_number(&self, idx: usize) -> ScriptError {
        ScriptError::InvalidNumber {
            line: self.line,
            value: self.args[idx].to_string(),
        }
    }
}
