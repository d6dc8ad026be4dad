//! Static supplications shown next to the timetable.

/// A supplication with its recitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dua {
    /// Short heading, e.g. "Sehri Dua".
    pub title: &'static str,
    /// Arabic text.
    pub arabic: &'static str,
    /// Remote audio clip of the recitation.
    pub audio_url: &'static str,
}

/// A collapsible panel of related supplications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuaGroup {
    /// Panel heading.
    pub title: &'static str,
    /// Supplications in display order.
    pub duas: &'static [Dua],
}

const FASTING_DUAS: [Dua; 2] = [
    Dua {
        title: "Sehri Dua",
        arabic: "وَبِصَوْمِ غَدٍ نَّوَيْتُ مِنْ شَهْرِ رَمَضَانَ",
        audio_url: "https://www.prayerstimings.com/data/audio/0/4-e55e9bba4621cb00b6c62b8dc2f0b0e4.mp3",
    },
    Dua {
        title: "Iftar Dua",
        arabic: "اللَّهُمَّ إِنِّي لَكَ صُمْتُ وَبِكَ آمَنْتُ وَعَلَيْكَ تَوَكَّلْتُ وَعَلَى رِزْقِكَ أَفْطَرْتُ",
        audio_url: "https://islamictimedate.com/apps/data/audio/0/10-e7f3cee2e94f103917366f88a6f16a4b.mp3",
    },
];

const ASHRA_DUAS: [Dua; 3] = [
    Dua {
        title: "First Ashra Dua (رحمت)",
        arabic: "يَا حَيُّ يَا قَيُّومُ بِرَحْمَتِكَ أَسْتَغِيثُ",
        audio_url: "https://islamictimedate.com/apps/data/audio/0/14-6a4644a7fa0262324c53ad354aeecfb2.mp3",
    },
    Dua {
        title: "Second Ashra Dua (مغفرت)",
        arabic: "أَسْتَغْفِرُ اللَّهَ رَبِّي مِنْ كُلِّ ذَنْبٍ وَأَتُوبُ إِلَيْهِ",
        audio_url: "https://islamictimedate.com/apps/data/audio/0/12-ac2fcc54eeb8a0930ed412dfbde1352a.mp3",
    },
    Dua {
        title: "Third Ashra Dua (نجات)",
        arabic: "اللَّهُمَّ أَجِرْنِي مِنَ النَّارِ",
        audio_url: "https://islamictimedate.com/apps/data/audio/0/16-9b2365379ac6eb329409d0ad21393613.mp3",
    },
];

/// Every dua panel, in display order.
pub static DUA_GROUPS: [DuaGroup; 2] = [
    DuaGroup {
        title: "Sehri & Iftar Duas",
        duas: &FASTING_DUAS,
    },
    DuaGroup {
        title: "Three Ashra Duas",
        duas: &ASHRA_DUAS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_hold_fasting_and_ashra_duas() {
        let counts: Vec<usize> = DUA_GROUPS.iter().map(|group| group.duas.len()).collect();
        assert_eq!(counts, [2, 3]);
    }

    #[test]
    fn every_dua_links_an_mp3() {
        for dua in DUA_GROUPS.iter().flat_map(|group| group.duas) {
            assert!(dua.audio_url.starts_with("https://"), "{}", dua.title);
            assert!(dua.audio_url.ends_with(".mp3"), "{}", dua.title);
            assert!(!dua.arabic.is_empty(), "{}", dua.title);
        }
    }
}
