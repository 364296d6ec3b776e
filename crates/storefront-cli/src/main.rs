// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    storefront_cli::main_entry()
}
