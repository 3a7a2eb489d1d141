//! Login screen

use std::io::{self, Write};

pub fn render(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Welcome to Reachinbox")?;
    writeln!(out, "Sign in to manage your emails efficiently")?;
    writeln!(out)?;
    writeln!(out, "Type `login` to continue with Google")
}
