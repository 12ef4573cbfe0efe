//! # 인증 서비스 모듈
//!
//! 토큰 코덱, 소셜 프로바이더 어댑터, 신원 정합, 토큰 갱신을 제공합니다.
//!
//! | 모듈 | 책임 |
//! |------|------|
//! | [`token_codec`] | JWT 발급/파싱/만료 판정 |
//! | [`providers`] | 프로바이더별 인가 코드 교환 |
//! | [`reconciler`] | 외부 신원 → 회원 계정 정합 |
//! | [`refresh`] | 리프레시 토큰으로 토큰 쌍 재발급 |
//! | [`social_auth_service`] | 위 셋을 연결하는 오케스트레이터 |

pub mod providers;
pub mod reconciler;
pub mod refresh;
pub mod social_auth_service;
pub mod token_codec;

pub use refresh::RefreshCoordinator;
pub use social_auth_service::{SocialAuthService, SocialLoginOutcome};
pub use token_codec::TokenCodec;
