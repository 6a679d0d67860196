fn main() {
    if let Err(err) = keil2make::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
