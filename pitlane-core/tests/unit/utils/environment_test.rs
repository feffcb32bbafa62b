use super::*;

#[test]
fn can_create_environment_with_time_quota() {
    assert!(Environment::new_with_time_quota(Some(300)).quota.is_some());
    assert!(Environment::new_with_time_quota(None).quota.is_none());
}

#[test]
fn can_detect_exhausted_time_quota() {
    let quota = TimeQuota::new(0.);

    assert!(quota.is_reached());
}

#[test]
fn can_keep_fresh_time_quota_unreached() {
    let quota = TimeQuota::new(600.);

    assert!(!quota.is_reached());
}
