//! Shell integration snippets.
//!
//! `ezjump init <shell>` prints a script meant to be `eval`'d from the shell's
//! rc file. It defines `z` (jump), `zi` (interactive pick) and a hook that
//! remembers every directory the shell enters.

use crate::core::error::EzjumpError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl FromStr for Shell {
    type Err = EzjumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            other => Err(EzjumpError::Usage(format!("unsupported shell '{}'", other))),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
        };
        f.write_str(name)
    }
}

const POSIX_FUNCTIONS: &str = r#"z() {
    local __ezjump_dest
    __ezjump_dest="$(command {bin} jump -- "$*")" || return
    [ -n "$__ezjump_dest" ] && builtin cd -- "$__ezjump_dest"
}

zi() {
    local __ezjump_dest
    __ezjump_dest="$(command {bin} pick -- "$*")" || return
    [ -n "$__ezjump_dest" ] && builtin cd -- "$__ezjump_dest"
}
"#;

const BASH_HOOK: &str = r#"__ezjump_hook() {
    if [ "${__ezjump_last_pwd:-}" != "$PWD" ]; then
        __ezjump_last_pwd="$PWD"
        command {bin} remember >/dev/null 2>&1
    fi
}

case ";${PROMPT_COMMAND:-};" in
    *";__ezjump_hook;"*) ;;
    *) PROMPT_COMMAND="__ezjump_hook;${PROMPT_COMMAND:-}" ;;
esac
"#;

const ZSH_HOOK: &str = r#"__ezjump_hook() {
    command {bin} remember >/dev/null 2>&1
}

autoload -Uz add-zsh-hook
add-zsh-hook chpwd __ezjump_hook
"#;

const FISH_SCRIPT: &str = r#"function __ezjump_hook --on-variable PWD
    command {bin} remember >/dev/null 2>&1
end

function z
    set -l dest (command {bin} jump -- "$argv")
    or return
    test -n "$dest"; and builtin cd -- $dest
end

function zi
    set -l dest (command {bin} pick -- "$argv")
    or return
    test -n "$dest"; and builtin cd -- $dest
end
"#;

/// Integration script for `shell`, invoking the binary as `bin`.
pub fn init_script(shell: Shell, bin: &str) -> String {
    let script = match shell {
        Shell::Bash => format!("{}\n{}", POSIX_FUNCTIONS, BASH_HOOK),
        Shell::Zsh => format!("{}\n{}", POSIX_FUNCTIONS, ZSH_HOOK),
        Shell::Fish => FISH_SCRIPT.to_string(),
    };
    script.replace("{bin}", bin)
}
