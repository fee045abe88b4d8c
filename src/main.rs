use std::env;
use std::process;

use vector3d::config::Config;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cfg = match Config::new(args) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: vector3d -axis X Y Z (-angle DEG | -rad RAD) -point X Y Z [-strict]");
            process::exit(1);
        }
    };
    log::info!("{cfg}");

    match cfg.rotate() {
        Ok(point) => println!("{point}"),
        Err(err) => {
            log::error!("rotation failed: {err}");
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
