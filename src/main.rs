//! rHeadcount main entrypoint.

use rheadcount::run;
use rheadcount::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
