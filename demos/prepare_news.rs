use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    textprep::apps::run_prepare_news(std::env::args().skip(1))
}
