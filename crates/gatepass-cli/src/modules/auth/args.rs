use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    #[arg(long, help = "Read the password from the argument instead of prompting")]
    pub password: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub email: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long, help = "Read the password from the argument instead of prompting")]
    pub password: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct LogoutArgs {
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long)]
    pub token_name: Option<String>,
}
