//! Turns a parsed command into one engine call and a notice describing the
//! outcome.
use std::fmt::Write;

use engine::{Dream, Engine, EngineError, MoneyCents};

use crate::{
    config::{Command, DreamCommand},
    notice::Notice,
};

pub fn execute(engine: &mut Engine, command: Command) -> Notice {
    let outcome = match command {
        Command::Show => Ok(show(engine)),
        Command::Deposit { amount } => deposit(engine, &amount),
        Command::Withdraw { amount } => withdraw(engine, &amount),
        Command::SetBalance { amount } => set_balance(engine, &amount),
        Command::Preview { amount } => preview(engine, &amount),
        Command::Dream(command) => dream(engine, command),
    };
    outcome.unwrap_or_else(|err| Notice::rejected(&err))
}

fn parse(raw: &str) -> Result<MoneyCents, EngineError> {
    raw.parse()
}

fn deposit(engine: &mut Engine, raw: &str) -> Result<Notice, EngineError> {
    let amount = parse(raw)?;
    engine.deposit(amount)?;
    Ok(Notice::deposited(amount))
}

fn withdraw(engine: &mut Engine, raw: &str) -> Result<Notice, EngineError> {
    let withdrawal = engine.withdraw(parse(raw)?)?;
    Ok(Notice::withdrew(withdrawal.withdrawn))
}

fn set_balance(engine: &mut Engine, raw: &str) -> Result<Notice, EngineError> {
    engine.set_balance(parse(raw)?)?;
    Ok(Notice::success(
        "Balance Updated 🐷",
        format!("Your piggy bank now holds {}.", engine.balance()),
    ))
}

fn preview(engine: &Engine, raw: &str) -> Result<Notice, EngineError> {
    let preview = engine.preview_balance(parse(raw)?)?;
    Ok(Notice::info("Preview", format!("Preview: {preview}")))
}

fn dream(engine: &mut Engine, command: DreamCommand) -> Result<Notice, EngineError> {
    let notice = match command {
        DreamCommand::Add { name, amount } => {
            let amount = parse(&amount)?;
            engine.add_dream(&name, amount)?;
            Notice::success(
                "Yay! New Dream Added! 🌟",
                format!("Your dream \"{}\" is now on your list!", name.trim()),
            )
        }
        DreamCommand::Save { id, amount } => match engine.allocate(id, parse(&amount)?)? {
            Some(moved) => Notice::success(
                "Woohoo! Savings Added! 🎉",
                format!("You just saved {moved} for your dream!"),
            ),
            None => Notice::dream_not_found(id),
        },
        DreamCommand::Boost { id } => match engine.boost(id)? {
            Some(moved) => Notice::success(
                "Dream Boosted! 🚀",
                format!("You just added {moved} to your dream!"),
            ),
            None => Notice::dream_not_found(id),
        },
        DreamCommand::Edit { id, cost, saved } => {
            let Some(current) = engine.dream(id) else {
                return Ok(Notice::dream_not_found(id));
            };
            let cost = cost.as_deref().map(parse).transpose()?.unwrap_or(current.amount);
            let saved = saved.as_deref().map(parse).transpose()?.unwrap_or(current.saved);
            match engine.edit_dream(id, cost, saved)? {
                Some(_) => Notice::success("Dream Updated! 🌈", "Your dream has new details now!"),
                None => Notice::dream_not_found(id),
            }
        }
        DreamCommand::Project { id, saved } => {
            let projected = engine.projected_balance(id, parse(&saved)?)?;
            Notice::info("Projected balance", format!("Projected balance: {projected}"))
        }
        DreamCommand::Delete { id } => match engine.delete_dream(id)? {
            Some(_) => Notice::success(
                "Dream Removed 🧹",
                "Your dream is gone, but your savings are safe!",
            ),
            None => Notice::dream_not_found(id),
        },
        DreamCommand::Achieve { id } => match engine.achieve_dream(id)? {
            Some(dream) => Notice::success(
                "Dream Achieved! 🎊🎊🎊",
                format!("Wow! You did it! You achieved your dream: \"{}\"", dream.name),
            ),
            None => Notice::dream_not_found(id),
        },
        DreamCommand::Clear => {
            engine.remove_all_dreams()?;
            Notice::success("All Dreams Removed 🧹", "Your dream list is now empty.")
        }
    };
    Ok(notice)
}

fn show(engine: &Engine) -> Notice {
    let mut out = format!("Balance: {}", engine.balance());
    if engine.dreams().is_empty() {
        out.push_str("\nNo dreams yet.");
    }
    for dream in engine.dreams() {
        let _ = write!(out, "\n{}", describe(dream));
    }
    Notice::info("My Piggy Bank 🐷", out)
}

fn describe(dream: &Dream) -> String {
    let mut line = format!(
        "[{}] {}: saved {} of {} ({:.0}%)",
        dream.id,
        dream.name,
        dream.saved,
        dream.amount,
        dream.progress_percent()
    );
    if dream.is_complete() {
        line.push_str(" - ready to achieve!");
    } else if dream.saved.is_positive() {
        let _ = write!(line, " - only need {}!", dream.remaining());
    }
    line
}
