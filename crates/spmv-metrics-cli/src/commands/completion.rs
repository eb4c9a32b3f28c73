// Dweve SpMV Metrics - Sparse-matrix benchmark speedup and efficiency toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation

use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(generator: G, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
}

/// Installation instructions for the completion script of `shell`.
///
/// Shell names are case-insensitive.
///
/// ```
/// use spmv_metrics_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("Zsh").contains("~/.zshrc"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => r#"# Bash completion installation:

# For current session only:
eval "$(spmv-metrics completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(spmv-metrics completion bash)"' >> ~/.bashrc
"#
        .to_string(),
        "zsh" => r#"# Zsh completion installation:

# For current session only:
eval "$(spmv-metrics completion zsh)"

# For persistent installation, add to your ~/.zshrc:
echo 'eval "$(spmv-metrics completion zsh)"' >> ~/.zshrc
"#
        .to_string(),
        "fish" => r#"# Fish completion installation:

spmv-metrics completion fish > ~/.config/fish/completions/spmv-metrics.fish
"#
        .to_string(),
        "powershell" | "pwsh" => r#"# PowerShell completion installation:

# Add this line to the profile at $PROFILE:
spmv-metrics completion powershell | Out-String | Invoke-Expression
"#
        .to_string(),
        "elvish" => r#"# Elvish completion installation:

# Add this line to ~/.elvish/rc.elv:
eval (spmv-metrics completion elvish)
"#
        .to_string(),
        _ => "Unsupported shell".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_the_binary() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let text = print_installation_instructions(shell);
            assert!(text.contains("spmv-metrics completion"), "{}", shell);
        }
    }

    #[test]
    fn test_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("bash"),
            print_installation_instructions("BASH")
        );
        assert_eq!(
            print_installation_instructions("pwsh"),
            print_installation_instructions("PowerShell")
        );
    }
}
