use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    textprep::apps::run_service_records(std::env::args().skip(1))
}
