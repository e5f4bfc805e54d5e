use crate::cli::{Cli, Shell};
use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};
use std::io;

const BIN_NAME: &str = "slotwatch";

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::PowerShell => ClapShell::PowerShell,
            Shell::Elvish => ClapShell::Elvish,
        }
    }
}

fn install_hint(shell: &Shell) -> &'static str {
    match shell {
        Shell::Bash => "Add to ~/.bashrc:\n#   eval \"$(slotwatch completions bash)\"",
        Shell::Zsh => "Add to ~/.zshrc:\n#   eval \"$(slotwatch completions zsh)\"",
        Shell::Fish => {
            "Save to fish completion directory:\n#   slotwatch completions fish > ~/.config/fish/completions/slotwatch.fish"
        }
        Shell::PowerShell => {
            "Add to PowerShell profile:\n#   slotwatch completions powershell | Out-String | Invoke-Expression"
        }
        Shell::Elvish => "Add to Elvish config:\n#   eval (slotwatch completions elvish | slurp)",
    }
}

pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();

    eprintln!("Generating completion file for {:?}...", shell);
    generate(
        ClapShell::from(shell.clone()),
        &mut cmd,
        BIN_NAME,
        &mut io::stdout(),
    );
    eprintln!("\n# {}", install_hint(&shell));
}
