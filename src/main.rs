use plotex::prelude::*;
use std::io::{self, BufRead, Write};

/// The input line may carry the `y =` of the original text box.
fn strip_assignment(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('y')
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or(line)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let viewport = Viewport::default();
    let config = viewport.sample_config();
    let mut buffer = String::new();
    let mut stdout = io::stdout();
    let mut stdin = io::stdin().lock();
    loop {
        stdout.write_all("y = ".as_bytes())?;
        stdout.flush()?;
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }
        let text = strip_assignment(&buffer);
        if text.is_empty() {
            continue;
        }
        let (expr, diagnostics) = Expr::<f64>::parse(text);
        for err in &diagnostics {
            eprintln!("[ERROR] {}", err);
        }
        println!("{}", expr.root());
        match sample(&expr, &config) {
            Ok(points) => {
                let pixels = points
                    .iter()
                    .map(|p| viewport.to_screen(*p))
                    .collect::<Vec<_>>();
                if let (Some(first), Some(last)) = (pixels.first(), pixels.last()) {
                    println!(
                        "{} points from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                        pixels.len(),
                        first.0,
                        first.1,
                        last.0,
                        last.1
                    );
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                println!("ERROR!");
            }
        }
    }
    Ok(())
}
