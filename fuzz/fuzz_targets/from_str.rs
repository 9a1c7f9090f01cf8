#![no_main]
use libfuzzer_sys::fuzz_target;

use plotex::prelude::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (expr, _) = Expr::<f64>::parse(s);
        let _ = expr.eval(0.5);
        let _ = expr.try_eval(-0.5);
        let _ = format!("{}", expr.root());
        let _ = s.parse::<Expr<f32>>();
    }
});
