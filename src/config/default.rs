// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

/// Minimal configuration written by `gfc init --preset minimal`.
pub fn minimal_config() -> &'static str {
    r#"# gfc configuration (minimal)
[commit]
max_subject_length = 72
"#
}

/// Standard configuration written by `gfc init --preset standard`.
pub fn standard_config() -> &'static str {
    r#"# gfc configuration (standard)
[commit]
max_subject_length = 72
emoji = true
append_version = true
default_template = "default"

[[commit.templates]]
name = "default"
content = "<icon><space><type>(<scope>):<space><subject><enter><body><enter><footer>"

[[commit.templates]]
name = "angular"
content = "<type>(<scope>):<space><subject><enter><body><enter><footer>"

[workflow]
master = "master"
develop = "develop"
"#
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# gfc configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Commit message authoring
[commit]
max_subject_length = 72
emoji = true
append_version = true
default_template = "default"

# Placeholders: <icon> <type> <scope> <subject> <body> <footer> <enter> <space>
[[commit.templates]]
name = "default"
content = "<icon><space><type>(<scope>):<space><subject><enter><body><enter><footer>"

[[commit.templates]]
name = "angular"
content = "<type>(<scope>):<space><subject><enter><body><enter><footer>"

[[commit.templates]]
name = "simple"
content = "<icon><space><subject>"

[[commit.types]]
name = "feat"
icon = "✨"
description = "A new feature"

[[commit.types]]
name = "fix"
icon = "🐛"
description = "A bug fix"

[[commit.types]]
name = "docs"
icon = "📝"
description = "Documentation only changes"

[[commit.types]]
name = "refactor"
icon = "♻️"
description = "Code refactoring (no feature/fix)"

[[commit.types]]
name = "chore"
icon = "🔧"
description = "Build process or auxiliary tool changes"

# Project version lookup
[version]
config_file = ".projectversion.json"

# Branch workflow defaults offered by `gfc flow init`
[workflow]
master = "master"
develop = "develop"
feature = "feature/"
release = "release/"
hotfix = "hotfix/"
support = "support/"
version_tag = ""

# UI configuration
[ui]
color = true
hints = true
"#
}
