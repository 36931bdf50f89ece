// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Log at error level and terminate the process with a failure status.
#[macro_export]
macro_rules! fatal {
    ($fmt:expr) => (
        {
            ::log::error!($fmt);
            std::process::exit(1);
        }
    );
    ($fmt:expr, $($arg:tt)*) => (
        {
            ::log::error!($fmt, $($arg)*);
            std::process::exit(1);
        }
    );
}
