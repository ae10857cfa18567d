use bfi::Interpreter;

fn main() {
    // Adds the character codes of two input characters: 0x20 + 0x21 = 'A'.
    let code = ",>,[>+<-]<.";

    let mut bf = match Interpreter::new(code, " !") {
        Ok(bf) => bf,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    match bf.run() {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("interpreter error: {err}");
            std::process::exit(1);
        }
    }

    // Tip: to watch execution step by step, use:
    // let _ = bf.run_debug(); // prints a step-by-step table
}
