// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Writes a single `fatal: <message>` line to stderr and terminates the
/// process with a non-zero status. Malformed benchmark input is a data
/// error, not a condition to recover from.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        eprintln!("fatal: {}", format_args!($($arg)*));
        std::process::exit(1)
    }};
}
