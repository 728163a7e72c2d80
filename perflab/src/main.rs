fn main() {
    if let Err(e) = perflab::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
