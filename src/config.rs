use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_public_key: String, // PEM, Ed25519; tokens are issued by the external identity provider
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY")
                .expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
        }
    }
}
