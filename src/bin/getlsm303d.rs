//! getlsm303d - read the LSM303D eCompass from the command line
//!
//! Usage:
//!   getlsm303d -t -l 7.73
//!   getlsm303d -b /dev/i2c-0 -i
//!   getlsm303d -d

use pi_lsm303d::config::{parse_declination, DeviceAddress, DriverConfig};
use pi_lsm303d::core::logging;
use pi_lsm303d::devices::magnetometer::mmc3416::{self, OutputResolution};
use pi_lsm303d::devices::magnetometer::{ContinuousFrequency, DeviceFamily, Lsm303d, SensorInfo};
use pi_lsm303d::devices::traits::CompassSensor;
use pi_lsm303d::platform::linux::{LinuxI2c, LinuxTimer};
use pi_lsm303d::Result;
use std::env;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// Accepted declination range in degrees
const DECLINATION_LIMIT: f32 = 30.0;

#[derive(Debug, Clone, Copy)]
enum Command {
    Dump,
    Info,
    Reset,
    Measure,
    Continuous(ContinuousFrequency),
    Resolution(OutputResolution),
}

struct Args {
    command: Command,
    bus: Option<String>,
    address: Option<DeviceAddress>,
    family: Option<DeviceFamily>,
    declination: Option<f32>,
    verbose: bool,
}

fn parse_args() -> Args {
    let raw: Vec<String> = env::args().collect();
    if raw.len() == 1 {
        print_usage();
        process::exit(-1);
    }

    let mut command = None;
    let mut args = Args {
        command: Command::Measure,
        bus: None,
        address: None,
        family: None,
        declination: None,
        verbose: false,
    };

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-b" => {
                i += 1;
                args.bus = Some(value(&raw, i, "-b").to_string());
            }
            "-a" => {
                i += 1;
                args.address = Some(or_exit(DeviceAddress::parse_hex(value(&raw, i, "-a"))));
            }
            "-f" => {
                i += 1;
                args.family = Some(or_exit(value(&raw, i, "-f").parse()));
            }
            "-c" => {
                i += 1;
                let mode = value(&raw, i, "-c").parse::<u8>().unwrap_or(u8::MAX);
                command = Some(Command::Continuous(or_exit(ContinuousFrequency::try_from(mode))));
            }
            "-m" => {
                i += 1;
                command = Some(Command::Resolution(or_exit(value(&raw, i, "-m").parse())));
            }
            "-l" => {
                i += 1;
                let declination = or_exit(parse_declination(value(&raw, i, "-l")));
                if !(-DECLINATION_LIMIT..=DECLINATION_LIMIT).contains(&declination) {
                    eprintln!("Error: Cannot get valid -l declination (should be -30..30).");
                    process::exit(-1);
                }
                args.declination = Some(declination);
            }
            "-d" => command = Some(Command::Dump),
            "-i" => command = Some(Command::Info),
            "-r" => command = Some(Command::Reset),
            "-t" => command = Some(Command::Measure),
            "-v" => args.verbose = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(-1);
            }
        }
        i += 1;
    }

    match command {
        Some(command) => args.command = command,
        None => {
            eprintln!("Error: no action given, use one of -c -d -i -m -r -t");
            print_usage();
            process::exit(-1);
        }
    }
    args
}

fn value<'a>(raw: &'a [String], i: usize, flag: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: {flag} requires a value");
        process::exit(-1);
    })
}

fn or_exit<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(-1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: getlsm303d [-b i2c-bus] [-a addr] [-f family] [-c 0..3] [-d] [-i] [-m mode] [-t] [-l decl] [-r] [-v]\n\
         \n\
         Command line parameters have the following format:\n\
         \x20  -b   I2C bus to query, Example: -b /dev/i2c-1 (default)\n\
         \x20  -a   sensor address in hex, Example: -a 0x1d (default), -a 0x1e\n\
         \x20  -f   sensor family: lsm303d (default) or mmc3416\n\
         \x20  -c   start continuous read with a given frequency 0..3. examples:\n\
         \x20            -c 0 = read at 1.5 Hz (1 sample every 1.5 seconds - default)\n\
         \x20            -c 1 = read at 13 Hz (1 sample every 77 milliseconds)\n\
         \x20            -c 2 = read at 25 Hz (1 sample every 40 milliseconds)\n\
         \x20            -c 3 = read at 50 Hz (1 sample every 20 milliseconds)\n\
         \x20  -d   dump the complete sensor register map content\n\
         \x20  -i   print sensor information\n\
         \x20  -l   local declination offset value (requires -t/-c), example: -l 7.73\n\
         \x20  -m   set sensor output resolution mode (mmc3416). arguments: 12/14/16/16h\n\
         \x20  -r   reset sensor (mmc3416)\n\
         \x20  -t   take a single measurement\n\
         \x20  -h   display this message\n\
         \x20  -v   enable debug output\n\
         \n\
         Environment: LSM303D_BUS, LSM303D_ADDR, LSM303D_DECLINATION\n\
         \n\
         Usage examples:\n\
         ./getlsm303d -b /dev/i2c-0 -i\n\
         ./getlsm303d -t -v\n\
         ./getlsm303d -c 1\n\
         ./getlsm303d -t -l 7.73"
    );
}

fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn build_config(args: &Args) -> Result<DriverConfig> {
    let mut config = DriverConfig::from_env()?;
    if let Some(family) = args.family {
        config.family = family;
        if family == DeviceFamily::Mmc3416 && args.address.is_none() {
            config.address = DeviceAddress::new(mmc3416::MMC3416_ADDR)?;
        }
    }
    if let Some(bus) = &args.bus {
        config.bus_path = bus.clone();
    }
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(declination) = args.declination {
        config.declination = declination;
    }
    config.verbose |= args.verbose;
    Ok(config)
}

fn print_info(info: &SensorInfo, ts: u64) {
    println!("----------------------------------------------");
    println!("{} Information at {}", info.family, ts);
    println!("----------------------------------------------");
    println!("    Sensor Product ID = {}", info.product_id);

    if let Some(control) = info.control {
        let state = if control.continuous { "Enabled" } else { "Disabled" };
        println!(
            "Continuous Read State = 0x{:02X} {}",
            u8::from(control.continuous),
            state
        );
        println!(
            "Continuous Read Freq. = 0x{:02X} {}",
            control.frequency.bits(),
            control.frequency
        );
        let boost = if control.no_boost {
            "CAP charged from VDD"
        } else {
            "CAP charge pump enabled"
        };
        println!(
            "No Boost CAP charging = 0x{:02X} {}",
            u8::from(control.no_boost),
            boost
        );
        println!(
            "    Output Resolution = 0x{:02X} {}",
            control.resolution.bits(),
            control.resolution
        );
    }
}

fn run(command: Command, config: DriverConfig) -> Result<()> {
    let ts = unix_time();
    let i2c = LinuxI2c::open(&config.bus_path)?;
    pi_lsm303d::log_debug!("ts=[{}] bus={} addr={}", ts, i2c.path(), config.address);
    let mut sensor = Lsm303d::open(i2c, LinuxTimer::new(), config)?;

    match command {
        Command::Dump => print!("{}", sensor.dump_registers()?),
        Command::Info => print_info(&sensor.info()?, ts),
        Command::Reset => sensor.soft_reset()?,
        Command::Resolution(resolution) => sensor.set_output_resolution(resolution)?,
        Command::Measure => {
            sensor.initialize()?;
            let heading = sensor.read_heading()?;
            println!("{ts} Heading={heading:.2} degrees");
        }
        Command::Continuous(frequency) => {
            sensor.initialize()?;
            if sensor.config().family.capabilities().frequency_control {
                sensor.set_continuous_frequency(frequency)?;
            }
            loop {
                let heading = sensor.read_heading()?;
                println!("{} Heading={heading:.2} degrees", unix_time());
                sensor.delay_ms(frequency.period_ms())?;
            }
        }
    }
    Ok(())
}

fn main() {
    let args = parse_args();
    let config = or_exit(build_config(&args));
    logging::init(config.verbose);

    if let Err(e) = run(args.command, config) {
        eprintln!("Error: {e}");
        process::exit(-1);
    }
}
