fn main() {
    if let Err(err) = cldmd::run() {
        eprintln!("{}", cldmd::format_error(&err));
        std::process::exit(cldmd::exit_code(&err));
    }
}
