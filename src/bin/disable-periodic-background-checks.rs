// SPDX-License-Identifier: AGPL-3.0-only

use envelope_hooks::{Hook, cli};

fn main() {
    cli::main(Hook::DisableBackgroundChecks)
}
