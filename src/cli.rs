// Message macros write to stderr: stdout carries the HTML document, and
// under CGI stderr ends up in the server error log.

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        eprint!("{} ", console::style("INFO ").blue().bright());
        eprintln!($($arg)+);
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        eprint!("{} ", console::style("WARN ").yellow().bright());
        eprintln!($($arg)+);
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        eprint!("{} ", console::style("ERROR").red().bright());
        eprintln!($($arg)+);
    };
}

#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {
        eprint!("{} ", console::style("DUE TO").yellow().bright());
        eprintln!($($arg)+);
    };
}
