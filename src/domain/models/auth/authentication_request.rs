//! 인증 미들웨어의 동작 방식을 정의하는 모델

use crate::domain::entities::members::member::MemberRole;

/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (있으면 검증, 없어도 허용)
    Optional,
}

/// 요구되는 역할 정보
///
/// 라우트 분류(공개 / 인증 필요 / 관리자 전용)는 라우트 설정 쪽에서
/// 결정되고, 이 코어는 "주체가 역할 X를 가졌는가"라는 원시 판정만 합니다.
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(MemberRole),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<MemberRole>),
}

impl RequiredRole {
    /// 회원 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: MemberRole) -> bool {
        match self {
            RequiredRole::Single(required) => role == *required,
            RequiredRole::Any(required) => required.contains(&role),
        }
    }
}
