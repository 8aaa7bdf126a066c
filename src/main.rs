fn main() {
    if let Err(err) = bpmn_lanes::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
