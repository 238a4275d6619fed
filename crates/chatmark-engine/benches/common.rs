// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_message(size: usize) -> String {
    let base = "## Symptoms\n\nMost people feel **tired** and *achy* for a few days.\n\n1. **Rest**: stay home\n- sleep\n- keep warm\n2. **Fluids**: drink water\n\n- see [NHS](https://www.nhs.uk/conditions/flu/)\n- use `paracetamol` if needed\n\n```text\ntemp < 38 & falling\n```\n\n> Call 111 if it gets worse\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_hostile_message(size: usize) -> String {
    "<script>alert(\"x\")</script> & ' \" ** * [ ( ` ".repeat(size)
}
