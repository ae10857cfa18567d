use bfi::Interpreter;

fn main() {
    // Echo one character, then loop it down to zero; run_debug prints a table row per step.
    let code = ",.[-]";

    let mut bf = match Interpreter::new(code, "\u{3}") {
        Ok(bf) => bf,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = bf.run_debug() {
        eprintln!("interpreter error: {err}");
        std::process::exit(1);
    }
}
