fn main() {
    if let Err(err) = feedback_intake_lib::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
