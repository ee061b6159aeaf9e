fn main() {
    if let Err(e) = texoverlay::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
