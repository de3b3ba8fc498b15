//! Interactive flashcard session
//!
//! Reads one action per line: f(lip), l(earning), m(astered), b(ack),
//! s(witch mode), q(uit).

use crate::commands::Context;
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use toeic_core::{CardStatus, Repository, SessionView, Store, StudyMode, StudySession};

const PROMPT: &str = "[f]lip [l]earning [m]astered [b]ack [s]witch [q]uit > ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Flip,
    Answer(CardStatus),
    Back,
    Switch,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    match line.trim().to_lowercase().as_str() {
        "f" | "flip" => Some(Action::Flip),
        "l" | "learning" => Some(Action::Answer(CardStatus::Learning)),
        "m" | "mastered" => Some(Action::Answer(CardStatus::Mastered)),
        "b" | "back" => Some(Action::Back),
        "s" | "switch" => Some(Action::Switch),
        "q" | "quit" => Some(Action::Quit),
        _ => None,
    }
}

pub fn run(ctx: &Context, deck_id: &str, review: bool) -> Result<()> {
    let mut store = ctx.store();
    let mode = if review {
        StudyMode::Review
    } else {
        StudyMode::Study
    };
    let mut session = StudySession::new(deck_id, mode);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    drive(&mut store, &mut session, stdin.lock(), &mut stdout)
}

/// Run a session until quit or end of input
pub fn drive<R, I, O>(
    store: &mut Store<R>,
    session: &mut StudySession,
    input: I,
    out: &mut O,
) -> Result<()>
where
    R: Repository,
    I: BufRead,
    O: Write,
{
    let deck_name = store
        .state()
        .deck(session.deck_id())
        .map(|d| d.name.clone())
        .ok_or_else(|| toeic_core::Error::DeckNotFound(session.deck_id().to_string()))?;

    writeln!(out, "{} ({} mode)", deck_name.bold(), session.mode())?;
    let mut flipped = false;
    let mut lines = input.lines();

    loop {
        render(store, session, flipped, out)?;
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_action(&line) {
            Some(Action::Flip) => flipped = !flipped,
            Some(Action::Answer(status)) => {
                if session.is_complete() {
                    writeln!(out, "Session is complete, switch mode or quit")?;
                } else {
                    session.answer(store, status)?;
                    flipped = false;
                }
            }
            Some(Action::Back) => {
                if session.back() {
                    flipped = false;
                } else {
                    writeln!(out, "Already at the first card")?;
                }
            }
            Some(Action::Switch) => {
                session.switch_mode(session.mode().other());
                flipped = false;
                writeln!(out, "Switched to {} mode", session.mode())?;
            }
            Some(Action::Quit) => break,
            None => writeln!(out, "Unknown action: {}", line.trim())?,
        }
    }

    let deck = store
        .state()
        .deck(session.deck_id())
        .ok_or_else(|| toeic_core::Error::DeckNotFound(session.deck_id().to_string()))?;
    writeln!(
        out,
        "{} {}/{} mastered",
        deck.name,
        deck.mastered_count(),
        deck.cards.len()
    )?;
    Ok(())
}

fn render<R, O>(
    store: &Store<R>,
    session: &mut StudySession,
    flipped: bool,
    out: &mut O,
) -> Result<()>
where
    R: Repository,
    O: Write,
{
    match session.view(store.state())? {
        SessionView::Complete => {
            let left = session.queue(store.state())?.len();
            let message = match session.mode() {
                StudyMode::Study if left == 0 => "All mastered! Session complete.".to_string(),
                StudyMode::Study => format!("End of queue, {} cards still to study.", left),
                StudyMode::Review => "Review complete.".to_string(),
            };
            writeln!(out, "{}", message.green().bold())?;
        }
        SessionView::Card {
            card,
            position,
            total,
        } => {
            writeln!(out)?;
            writeln!(out, "Card {} of {}", position + 1, total)?;
            let kind = if card.lexical_type.is_empty() {
                String::new()
            } else {
                format!(" ({})", card.lexical_type)
            };
            writeln!(out, "  {}{}", card.term.bold(), kind)?;
            if let Some(ref pron) = card.pronunciation {
                writeln!(out, "  {}", pron.dimmed())?;
            }
            if flipped {
                writeln!(out, "  {}", card.definition.cyan())?;
                if !card.example.is_empty() {
                    writeln!(out, "  {}", card.example.italic())?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use toeic_core::{AppState, Deck, MemoryRepository, NewCard};

    fn store() -> Store<MemoryRepository> {
        let mut state = AppState::default_dataset(800, Vec::new(), Utc::now());
        state.decks.push(Deck::new("deck-1".to_string(), "Office".to_string()));
        let rows = ["memo, bản ghi nhớ, n", "invoice, hóa đơn, n, Pay the invoice."];
        for row in rows {
            let card: NewCard = toeic_core::import::parse_row(row).unwrap();
            state.add_card_to_deck("deck-1", card).unwrap();
        }
        Store::open(MemoryRepository::new(), state)
    }

    fn session_output(
        store: &mut Store<MemoryRepository>,
        mode: StudyMode,
        input: &str,
    ) -> String {
        colored::control::set_override(false);
        let mut session = StudySession::new("deck-1", mode);
        let mut out = Vec::new();
        drive(store, &mut session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action(" M "), Some(Action::Answer(CardStatus::Mastered)));
        assert_eq!(parse_action("learning"), Some(Action::Answer(CardStatus::Learning)));
        assert_eq!(parse_action("x"), None);
    }

    #[test]
    fn test_master_everything() {
        let mut store = store();
        let out = session_output(&mut store, StudyMode::Study, "f\nm\nm\n");

        assert!(out.contains("Card 1 of 2"));
        assert!(out.contains("bản ghi nhớ"));
        assert!(out.contains("Card 1 of 1"));
        assert!(out.contains("All mastered!"));
        assert!(out.contains("Office 2/2 mastered"));
    }

    #[test]
    fn test_learning_advances_and_back_returns() {
        let mut store = store();
        let out = session_output(&mut store, StudyMode::Study, "b\nl\nb\nq\n");

        assert!(out.contains("Already at the first card"));
        assert!(out.contains("Card 2 of 2"));
        // Shown at start, after the refused back, and after stepping back
        assert_eq!(out.matches("Card 1 of 2").count(), 3);
        assert!(out.contains("Office 0/2 mastered"));
    }

    #[test]
    fn test_run_off_end_is_not_all_mastered() {
        let mut store = store();
        let out = session_output(&mut store, StudyMode::Study, "l\nl\n");

        assert!(out.contains("End of queue, 2 cards still to study."));
        assert!(!out.contains("All mastered!"));
        assert!(out.contains("Office 0/2 mastered"));
    }

    #[test]
    fn test_back_after_run_off_end() {
        let mut store = store();
        let out = session_output(&mut store, StudyMode::Study, "l\nl\nb\nq\n");

        assert!(out.contains("End of queue"));
        // Shown at start and again after stepping back from the end
        assert_eq!(out.matches("Card 1 of 2").count(), 2);
        assert!(!out.contains("Already at the first card"));
    }

    #[test]
    fn test_switch_to_review() {
        let mut store = store();
        let out = session_output(&mut store, StudyMode::Review, "m\ns\nm\n");

        assert!(out.contains("Review complete."));
        assert!(out.contains("Session is complete"));
        assert!(out.contains("Switched to study mode"));
        assert!(out.contains("Office 1/2 mastered"));
    }

    #[test]
    fn test_unknown_deck() {
        let mut store = store();
        let mut session = StudySession::new("nope", StudyMode::Study);
        let mut out = Vec::new();
        assert!(drive(&mut store, &mut session, "q\n".as_bytes(), &mut out).is_err());
    }
}
