//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 불변 구조체로 한 번 로드하여,
//! 각 서비스 생성자에 명시적으로 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 비밀번호 해싱, 환경 관련 설정
//! - [`auth_config`] - JWT 토큰, OAuth 프로바이더 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 명시적 주입 (Explicit Injection)
//!
//! 전역 싱글톤 대신 `from_env()`로 구성한 설정 구조체를
//! 서비스 생성자에 넘깁니다. 설정은 프로세스 시작 이후 불변입니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보(서명 키, client secret)는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 프로덕션에서 필수 설정값 누락 시 시작 단계에서 패닉
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 소셜 프로바이더 (사용 시)
//! export GOOGLE_CLIENT_ID="..." GOOGLE_CLIENT_SECRET="..." GOOGLE_REDIRECT_URI="..."
//! export KAKAO_CLIENT_ID="..."  KAKAO_CLIENT_SECRET="..."  KAKAO_REDIRECT_URI="..."
//! export NAVER_CLIENT_ID="..."  NAVER_CLIENT_SECRET="..."  NAVER_REDIRECT_URI="..."
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
