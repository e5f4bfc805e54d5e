use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::error::Result;

pub fn execute(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => {
            let config_path = Config::create_sample()?;
            println!("Created sample config file at: {}", config_path.display());
            println!("\nPlease edit the file and set your store details:");
            println!("  database_url = \"https://your-project-default-rtdb.firebaseio.com\"");
            println!("  service = \"your-service\"");
        }
        ConfigCommand::Path => {
            let config_path = Config::config_file_path()?;
            println!("Config file path: {}", config_path.display());

            if config_path.exists() {
                println!("Status: File exists");

                match Config::load() {
                    Ok(config) => {
                        println!("Valid: Yes");
                        if config.is_complete() {
                            println!("Complete: Yes");
                            let (database_url, service) = config.store_location()?;
                            println!("\nStore:");
                            println!("  Database URL: {}", database_url);
                            println!("  Service: {}", service);
                        } else {
                            println!("Complete: No (missing database_url or service)");
                        }
                    }
                    Err(e) => {
                        println!("Valid: No");
                        println!("Error: {}", e);
                    }
                }
            } else {
                println!("Status: File does not exist");
                println!("\nTo create a sample config file, run:");
                println!("  slotwatch config init");
            }
        }
    }

    Ok(())
}
