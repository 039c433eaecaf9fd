use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub struct Args {
    pub power: usize,
    pub seed: u64,
    pub parameters: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum ArgsError {
    Usage,
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::Usage => write!(f, "usage: sculptor <power> <seed> [parameters.json]"),
            ArgsError::Invalid { name, value } => write!(f, "invalid {}: {}", name, value),
        }
    }
}

impl Error for ArgsError {}

const MAX_POWER: usize = 14;

impl Args {
    pub fn new(args: Vec<String>) -> Result<Args, ArgsError> {
        if args.len() < 3 || args.len() > 4 {
            return Err(ArgsError::Usage);
        }
        let power = match args[1].parse() {
            Ok(power) if power <= MAX_POWER => power,
            _ => {
                return Err(ArgsError::Invalid {
                    name: "power",
                    value: args[1].clone(),
                })
            }
        };
        let seed: u64 = args[2].parse().map_err(|_| ArgsError::Invalid {
            name: "seed",
            value: args[2].clone(),
        })?;
        Ok(Args {
            power,
            seed,
            parameters: args.get(3).cloned(),
        })
    }

    pub fn width(&self) -> usize {
        2usize.pow(self.power as u32)
    }

    /// Perlin seeds are 32 bit; both halves of the seed contribute.
    pub fn noise_seed(&self) -> u32 {
        (self.seed ^ (self.seed >> 32)) as u32
    }
}
