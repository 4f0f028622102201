use clap::{Parser, Subcommand};
use log::debug;
use pantry_chef::model::{CUISINE_OPTIONS, DIETARY_OPTIONS};
use pantry_chef::{
    IngredientSet, PreferenceProfile, RecipeRecommender, RecipeRequest, RecommenderConfig,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pantry-chef")]
#[command(version, about = "Recipe ideas from whatever is in your pantry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the configured model
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key (defaults to config file, PANTRY__PROVIDER__API_KEY or OPENAI_API_KEY)
    #[arg(long, global = true, env = "PANTRY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recipes from the given ingredients
    Generate {
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Dietary restriction (repeatable), e.g. vegan, gluten-free
        #[arg(long = "diet")]
        dietary_restrictions: Vec<String>,
        #[arg(long)]
        cuisine: Option<String>,
        /// Maximum cooking time in minutes (10-180)
        #[arg(long, default_value_t = 30)]
        time: u32,
        /// Number of servings (1-12)
        #[arg(long, default_value_t = 4)]
        servings: u32,
    },

    /// Suggest complementary ingredients, missing staples and cuisines
    Analyze {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },

    /// List the dietary restrictions and cuisines the recommender knows about
    Options,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Options = cli.command {
        return print_json(&serde_json::json!({
            "dietaryRestrictions": DIETARY_OPTIONS,
            "cuisines": CUISINE_OPTIONS,
        }));
    }

    let config = match RecommenderConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("{:?}", config);

    let mut builder = RecipeRecommender::builder().config(config.provider);
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(api_key) = cli.api_key {
        builder = builder.api_key(api_key);
    }
    let recommender = match builder.build() {
        Ok(recommender) => recommender,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Generate {
            ingredients,
            dietary_restrictions,
            cuisine,
            time,
            servings,
        } => {
            let mut preferences = PreferenceProfile::new()
                .with_cooking_time(time)
                .with_servings(servings);
            for restriction in dietary_restrictions {
                preferences = preferences.with_restriction(restriction);
            }
            if let Some(cuisine) = cuisine {
                preferences = preferences.with_cuisine(cuisine);
            }
            let request = RecipeRequest::new(ingredients.iter().collect(), preferences);

            match recommender.generate(&request).await {
                Ok(recipes) => print_json(&recipes),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Analyze { ingredients } => {
            let ingredients: IngredientSet = ingredients.iter().collect();
            print_json(&recommender.analyze(&ingredients).await)
        }
        Commands::Options => ExitCode::SUCCESS,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render output: {}", e);
            ExitCode::FAILURE
        }
    }
}
