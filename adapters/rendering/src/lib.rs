#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Garden Defence adapters.
//!
//! Adapters describe what they want to show as a [`Reply`] and hand it to a
//! [`RenderingBackend`]. The text backend prints the human-readable form,
//! the JSON backend prints one object per reply for other programs.

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use garden_defence_core::{GameSnapshot, PlantKind, Role, WELCOME_BANNER};
use serde::Serialize;

/// Something an adapter wants to tell the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// Greeting shown when a match starts, listing the catalog.
    Welcome {
        /// Stock available at the start.
        stock: u32,
    },
    /// Result of a player command.
    Outcome {
        /// Indicates whether the command changed the match.
        success: bool,
        /// Description of what happened.
        message: String,
    },
    /// Confirmation of a manual collection.
    Collected {
        /// Amount added by the collection.
        amount: u32,
        /// Stock after the collection.
        stock: u32,
    },
    /// Full status report.
    Status(GameSnapshot),
    /// List of available commands.
    Help {
        /// Current stock.
        stock: u32,
        /// Current wave.
        wave: u32,
    },
    /// Free-form notice that is not tied to a game command.
    Notice {
        /// Text of the notice.
        message: String,
    },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome { stock } => write_welcome(f, *stock),
            Self::Outcome { message, .. } | Self::Notice { message } => f.write_str(message),
            Self::Collected { amount, stock } => {
                write!(f, "Collected {amount} sun! You now have {stock} sun.")
            }
            Self::Status(snapshot) => write_status(f, snapshot),
            Self::Help { stock, wave } => write_help(f, *stock, *wave),
        }
    }
}

fn role_blurb(role: Role) -> &'static str {
    match role {
        Role::Producer { .. } => "produces sun",
        Role::Shooter { .. } => "shoots at invaders",
        Role::Wall => "sturdy wall",
        Role::Bomb { .. } => "powerful blast",
    }
}

fn write_welcome(f: &mut fmt::Formatter<'_>, stock: u32) -> fmt::Result {
    writeln!(f, "🎮 {WELCOME_BANNER}")?;
    writeln!(f)?;
    writeln!(f, "You have {stock} sun. Plants you can grow:")?;
    for kind in PlantKind::ALL {
        let spec = kind.spec();
        writeln!(
            f,
            "{} {} (`{}`) - {} sun, {}",
            spec.icon,
            spec.name,
            spec.key,
            spec.cost,
            role_blurb(spec.role)
        )?;
    }
    writeln!(f)?;
    write!(f, "Type `plant <plant> <row> <position>` or `wave`.")
}

fn write_status(f: &mut fmt::Formatter<'_>, snapshot: &GameSnapshot) -> fmt::Result {
    writeln!(f, "🌞 Sun: {}", snapshot.stock)?;
    writeln!(f, "🎯 Wave: {}", snapshot.wave)?;
    writeln!(f, "💀 Invaders defeated: {}", snapshot.kills)?;
    writeln!(f, "🧟 On the lawn: {}", snapshot.invaders_alive)?;
    writeln!(f)?;
    writeln!(f, "Lawn:")?;
    for row in &snapshot.lawn {
        writeln!(f, "{row}")?;
    }
    writeln!(f)?;

    if snapshot.invaders.is_empty() {
        f.write_str("No invaders yet")?;
    } else {
        f.write_str("Invaders:")?;
        for invader in &snapshot.invaders {
            write!(
                f,
                "\n{} in row {}, position {} (❤️{})",
                invader.kind.icon(),
                invader.cell.row().saturating_add(1),
                invader.cell.column().saturating_add(1),
                invader.health
            )?;
        }
    }

    if snapshot.game_over {
        write!(
            f,
            "\n\n💥 The invaders broke through! Type `reset` to play again."
        )?;
    }
    Ok(())
}

fn write_help(f: &mut fmt::Formatter<'_>, stock: u32, wave: u32) -> fmt::Result {
    writeln!(f, "Available commands:")?;
    writeln!(f, "- plant <plant> <row> <position>")?;
    writeln!(f, "- collect")?;
    writeln!(f, "- wave")?;
    writeln!(f, "- status")?;
    writeln!(f, "- new, reset")?;
    writeln!(f, "- quit")?;
    writeln!(f)?;
    write!(f, "You have {stock} sun. Wave {wave}.")
}

/// Destination capable of presenting replies.
pub trait RenderingBackend {
    /// Presents a single reply.
    fn present(&mut self, reply: &Reply) -> AnyResult<()>;
}

/// Backend writing the human-readable form, one blank line between replies.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing into `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, reply: &Reply) -> AnyResult<()> {
        writeln!(self.out, "{reply}\n").context("failed to write reply")?;
        self.out.flush().context("failed to flush reply")
    }
}

/// Backend writing one JSON object per line.
#[derive(Debug)]
pub struct JsonBackend<W> {
    out: W,
}

impl<W: Write> JsonBackend<W> {
    /// Creates a backend writing into `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for JsonBackend<W> {
    fn present(&mut self, reply: &Reply) -> AnyResult<()> {
        serde_json::to_writer(&mut self.out, reply).context("failed to encode reply")?;
        writeln!(self.out).context("failed to write reply")?;
        self.out.flush().context("failed to flush reply")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use garden_defence_core::{CellCoord, InvaderId, InvaderKind, InvaderSnapshot};

    use super::*;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            stock: 75,
            wave: 2,
            kills: 3,
            invaders_alive: 1,
            game_over: false,
            lawn: vec!["🌻🟩🟩".to_owned(), "🟩🥜🟩".to_owned()],
            invaders: vec![InvaderSnapshot {
                id: InvaderId::new(4),
                kind: InvaderKind::Basic,
                cell: CellCoord::new(1, 2),
                health: 140,
                damage: 10,
                last_action: Duration::from_secs(9),
            }],
            plants: Vec::new(),
        }
    }

    #[test]
    fn status_report_uses_one_based_positions() {
        let text = Reply::Status(snapshot()).to_string();
        assert_eq!(
            text,
            "🌞 Sun: 75\n🎯 Wave: 2\n💀 Invaders defeated: 3\n🧟 On the lawn: 1\n\n\
             Lawn:\n🌻🟩🟩\n🟩🥜🟩\n\nInvaders:\n🧟 in row 2, position 3 (❤️140)"
        );
    }

    #[test]
    fn status_report_without_invaders_says_so() {
        let mut snapshot = snapshot();
        snapshot.invaders.clear();
        snapshot.invaders_alive = 0;
        snapshot.game_over = true;

        let text = Reply::Status(snapshot).to_string();
        assert!(text.contains("\nNo invaders yet"), "{text}");
        assert!(text.ends_with("Type `reset` to play again."), "{text}");
    }

    #[test]
    fn welcome_lists_every_plant_with_its_cost() {
        let text = Reply::Welcome { stock: 50 }.to_string();
        assert!(text.contains(WELCOME_BANNER));
        assert!(text.contains("You have 50 sun"));
        for kind in PlantKind::ALL {
            let spec = kind.spec();
            assert!(text.contains(spec.name), "{text}");
            assert!(text.contains(&format!("{} sun", spec.cost)), "{text}");
        }
    }

    #[test]
    fn help_reports_stock_and_wave() {
        let text = Reply::Help { stock: 20, wave: 3 }.to_string();
        assert!(text.starts_with("Available commands:"));
        assert!(text.ends_with("You have 20 sun. Wave 3."));
    }

    #[test]
    fn text_backend_separates_replies() {
        let mut backend = TextBackend::new(Vec::new());
        backend
            .present(&Reply::Collected {
                amount: 25,
                stock: 75,
            })
            .expect("write");
        backend
            .present(&Reply::Notice {
                message: "bye".to_owned(),
            })
            .expect("write");

        let written = String::from_utf8(backend.into_inner()).expect("utf-8");
        assert_eq!(written, "Collected 25 sun! You now have 75 sun.\n\nbye\n\n");
    }

    #[test]
    fn json_backend_tags_each_reply() {
        let mut backend = JsonBackend::new(Vec::new());
        backend
            .present(&Reply::Outcome {
                success: false,
                message: "There is already a plant here!".to_owned(),
            })
            .expect("write");
        backend.present(&Reply::Status(snapshot())).expect("write");

        let written = String::from_utf8(backend.into_inner()).expect("utf-8");
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["reply"], "outcome");
        assert_eq!(lines[0]["success"], false);
        assert_eq!(lines[1]["reply"], "status");
        assert_eq!(lines[1]["stock"], 75);
        assert_eq!(lines[1]["invaders"][0]["cell"]["row"], 1);
    }
}
