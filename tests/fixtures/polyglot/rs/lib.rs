mod parser;

use std::collections::HashMap;

pub fn run() -> HashMap<String, usize> {
    HashMap::new()
}
