//! 서버 및 환경 설정 관리 모듈
//!
//! 서버 바인딩, 실행 환경, 비밀번호 해싱 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 문자열에서 Environment를 생성합니다.
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15 범위)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 환경 변수 `BCRYPT_COST` 또는 실행 환경 기본값으로 설정을 구성합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn from_env() -> Self {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return Self { bcrypt_cost: cost };
                }
            }
        }

        Self::for_env(&Environment::current())
    }

    /// 특정 환경에 대한 기본 bcrypt cost로 설정을 구성합니다.
    pub fn for_env(env: &Environment) -> Self {
        let bcrypt_cost = match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        };
        Self { bcrypt_cost }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `HOST`/`PORT` 환경 변수에서 서버 설정을 로드합니다.
    /// 기본값은 `0.0.0.0:8080` 입니다.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::for_env(&Environment::Development).bcrypt_cost, 4);
        assert_eq!(PasswordConfig::for_env(&Environment::Test).bcrypt_cost, 4);
        assert_eq!(PasswordConfig::for_env(&Environment::Staging).bcrypt_cost, 10);
        assert_eq!(PasswordConfig::for_env(&Environment::Production).bcrypt_cost, 12);
    }
}
