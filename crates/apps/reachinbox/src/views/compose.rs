//! Reply composer

use std::io::{self, Write};

use mail::compose::{ComposeState, Composer, TemplateVariable};

pub fn render(out: &mut dyn Write, composer: &Composer) -> io::Result<()> {
    let draft = composer.draft();
    let status = match composer.state() {
        ComposeState::Closed => return writeln!(out, "Composer closed"),
        ComposeState::Open => "editing",
        ComposeState::Sending => "sending",
    };
    writeln!(out, "Compose Email ({})", status)?;
    writeln!(out, "To:      {}", composer.to().unwrap_or("-"))?;
    writeln!(out, "Subject: {}", draft.subject())?;
    writeln!(out, "Body:    {}", draft.body())?;
    match draft.selection() {
        Some((start, end)) => writeln!(out, "Selection: {}..{}", start, end)?,
        None => writeln!(out, "Cursor: {}", draft.cursor())?,
    }
    if let Some(err) = composer.last_error() {
        writeln!(out, "Last send failed: {}", err)?;
    }
    let vars: Vec<_> = TemplateVariable::ALL
        .iter()
        .map(|v| format!("{} {}", v.label(), v.token()))
        .collect();
    writeln!(out, "Variables: {}", vars.join(", "))
}
