use promql_toolkit::{check_type, parse_expression, to_promql};

fn main() {
    let inputs = [
        "cpu_temperature{host=\"server1\"}",
        "{__name__=\"abc\", host=\"localhost\"} offset 5m",
        "some_metric[5m:1m] offset 10m",
        "sum by(job) (rate(http_requests_total[5m]))",
    ];

    for input in inputs {
        println!("\nParsing: {}", input);
        match parse_expression(input) {
            Ok(parsed) => {
                println!("  OK! Parsed: {:?}", parsed);
                match check_type(&parsed) {
                    Ok(ty) => println!("  Type: {ty}"),
                    Err(e) => println!("  Type error: {e}"),
                }
                println!("  Printed: {}", to_promql(&parsed));
            }
            Err(e) => println!("  Error: {:?}", e),
        }
    }
}
