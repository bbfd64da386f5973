fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match everybar_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[everybar-core] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = everybar_core::runtime::run_with_options(options) {
        eprintln!("[everybar-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
