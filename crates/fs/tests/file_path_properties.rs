#[macro_use]
extern crate pretty_assertions;
extern crate quickcheck;

#[macro_use(quickcheck)]
extern crate quickcheck_macros;

extern crate fpath_fs;

#[cfg(test)]
mod file_path_properties {
    use fpath_fs::{
        append, append_bounded, FilePath, NarrowNative, Transcode, Validity, WideNative,
        MAX_PATH_LEN, OS_PATH_SEPARATOR,
    };
    use fpath_test_utils::{assert_display_eq, init_tracing};
    use quickcheck::TestResult;

    fn representable(s: &str) -> bool {
        s.len() < MAX_PATH_LEN && !s.contains('\0')
    }

    /// Sets `s`, then converts the native form back to UTF-8.
    fn round_trip<T: Transcode>(s: &str) -> Option<String> {
        let mut path: FilePath<T> = FilePath::new();

        path.set(s);

        let native = path.native_units()?;
        let mut narrow = [0u8; MAX_PATH_LEN];
        let len = T::native_to_narrow(native, &mut narrow).ok()?;

        String::from_utf8(narrow[..len].to_vec()).ok()
    }

    #[quickcheck]
    fn set_round_trips_through_wide(s: String) -> TestResult {
        if !representable(&s) {
            return TestResult::discard();
        }

        TestResult::from_bool(round_trip::<WideNative>(&s).as_deref() == Some(s.as_str()))
    }

    #[quickcheck]
    fn set_round_trips_through_narrow(s: String) -> TestResult {
        if !representable(&s) {
            return TestResult::discard();
        }

        TestResult::from_bool(round_trip::<NarrowNative>(&s).as_deref() == Some(s.as_str()))
    }

    #[quickcheck]
    fn set_too_long_is_invalid(extra: u8, fill: char) -> TestResult {
        if fill == '\0' {
            return TestResult::discard();
        }

        // At least MAX_PATH_LEN bytes, however wide `fill` is.
        let s: String = core::iter::repeat(fill).take(MAX_PATH_LEN + extra as usize).collect();
        let mut path: FilePath = FilePath::new();

        path.set("/previously/valid");
        path.set(&s);

        TestResult::from_bool(
            path.validity() == Validity::Invalid && path.native_path().is_none(),
        )
    }

    #[quickcheck]
    fn appends_to_invalid_change_nothing(segment: String, max_chars: usize) -> bool {
        let mut path: FilePath<WideNative> = FilePath::new();
        let wide: Vec<u16> = segment.encode_utf16().collect();

        append!(path, "{}", segment);
        append_bounded!(path, max_chars % (MAX_PATH_LEN + 1), "{}", segment);
        path.push(&segment);
        path.append_native(&wide);

        !path.is_valid()
            && path.narrow_len() == 0
            && path.native_units().is_none()
            && path.as_str().is_none()
    }

    #[quickcheck]
    fn copy_is_independent(a: String, b: String) -> TestResult {
        if !representable(&a) || !representable(&b) {
            return TestResult::discard();
        }

        let mut src: FilePath = FilePath::new();
        let mut dst: FilePath = FilePath::new();

        src.set(&a);
        dst.copy_from(Some(&src));
        let before = dst.native_units().map(<[_]>::to_vec);

        src.set(&b);
        src.push(&b);

        TestResult::from_bool(
            dst.as_str() == Some(a.as_str()) && dst.native_units().map(<[_]>::to_vec) == before,
        )
    }

    #[quickcheck]
    fn copy_from_nothing_invalidates(a: String, from_invalid: bool) -> TestResult {
        if !representable(&a) {
            return TestResult::discard();
        }

        let invalid: FilePath = FilePath::new();
        let mut dst: FilePath = FilePath::new();

        dst.set(&a);
        dst.copy_from(if from_invalid { Some(&invalid) } else { None });

        TestResult::from_bool(dst.validity() == Validity::Invalid)
    }

    #[quickcheck]
    fn bounded_append_honors_the_limit(max_chars: usize, segment: String) -> TestResult {
        if segment.contains('\0') {
            return TestResult::discard();
        }

        let max_chars = max_chars % (MAX_PATH_LEN + 16);
        let mut path: FilePath = FilePath::new();

        path.set("/base");
        append_bounded!(path, max_chars, "{}", segment);

        let appended = path
            .as_str()
            .and_then(|s| s.strip_prefix("/base"))
            .map(str::to_string);

        if max_chars > MAX_PATH_LEN {
            TestResult::from_bool(appended.as_deref() == Some(""))
        } else {
            let mut expected = String::new();

            expected.push(OS_PATH_SEPARATOR);
            expected.extend(segment.chars().take(max_chars));

            TestResult::from_bool(appended == Some(expected))
        }
    }

    #[test]
    fn scenario_set_then_append() {
        init_tracing();

        let mut path: FilePath = FilePath::new();

        path.set("/tmp");
        assert!(path.is_valid());

        append!(path, "sub{}", 1);

        let expected = format!("/tmp{}sub1", OS_PATH_SEPARATOR);

        assert_display_eq!(path.as_str().unwrap(), expected.as_str());
        assert_eq!(
            round_trip::<fpath_fs::TargetNative>(path.as_str().unwrap()),
            Some(expected)
        );
    }

    #[test]
    fn scenario_fresh_path_has_no_native_form() {
        let path: FilePath = FilePath::default();

        assert!(path.native_path().is_none());
    }

    #[test]
    fn scenario_set_exactly_capacity() {
        let mut path: FilePath = FilePath::new();

        path.set(&"x".repeat(MAX_PATH_LEN));

        assert_eq!(path.validity(), Validity::Invalid);
    }
}
