//! 프롬프트 마켓 백엔드
//!
//! 프롬프트 공유 마켓플레이스의 인증 및 토큰 서브시스템입니다.
//! JWT 토큰 기반 상태 없는 인증, 3개 소셜 프로바이더(Google/Kakao/Naver)
//! 로그인, 관리자 비밀번호 로그인을 제공합니다.
//!
//! # Features
//!
//! - **토큰 코덱**: HMAC 서명 액세스/리프레시 토큰 발급 및 검증
//! - **소셜 로그인**: 인가 코드 교환 → 외부 신원 정규화 → 계정 정합(find-or-create-or-reactivate)
//! - **인증 게이트**: 요청별 Bearer 토큰 검증 미들웨어 (예외 없이 태그 기반 처리)
//! - **토큰 갱신**: 리프레시 토큰 소유권 검증 후 새 토큰 쌍 재발급
//! - **역할 기반 접근 제어**: 공개 / 인증 필요 / 관리자 전용 라우트 분류
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 라우트 분류 (public / authenticated / admin)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 코덱, 프로바이더 어댑터, 정합, 갱신
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Member 저장소 계약 (save / findBy*)
//! └─────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
