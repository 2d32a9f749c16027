// UI Constants
pub const APP_TITLE: &str = "DevOps AI Assistant";
pub const APP_DIR_NAME: &str = "devops-assistant";

// Storage keys, shared with the web build of the assistant
pub const USE_MOCK_KEY: &str = "useMock";
pub const LAMBDA_URL_KEY: &str = "lambdaUrl";

// Deployment environment
pub const API_KEY_VAR: &str = "CHATBOT_API_KEY";
pub const AGENT_ID_VAR: &str = "BEDROCK_AGENT_ID";
pub const AGENT_ALIAS_ID_VAR: &str = "BEDROCK_AGENT_ALIAS_ID";
pub const API_KEY_HEADER: &str = "x-api-key";

// Response timing
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;

// Reply texts
pub const MISSING_URL_ADVISORY: &str =
    "Please enter a valid Lambda URL in the settings to use real responses.";
pub const EMPTY_REMOTE_REPLY: &str = "The Lambda function didn't return a valid response.";
pub const EXCHANGE_FAILED_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";
