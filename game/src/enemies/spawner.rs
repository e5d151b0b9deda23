//! Wave composition tables.
//!
//! Early waves are hand-authored to pace the difficulty curve and place
//! the two boss encounters; everything else is generated from the wave
//! number. A wave with a boss spawns only the boss.

use super::EnemyType;

/// What a wave spawns: either a lone boss or grouped regular enemies.
/// Group entries are `(kind, count, shielded)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveComposition {
    pub boss: Option<EnemyType>,
    pub groups: Vec<(EnemyType, u32, bool)>,
}

impl WaveComposition {
    fn boss(enemy_type: EnemyType) -> Self {
        Self {
            boss: Some(enemy_type),
            groups: Vec::new(),
        }
    }

    fn groups(groups: Vec<(EnemyType, u32, bool)>) -> Self {
        Self { boss: None, groups }
    }

    pub fn total(&self) -> u32 {
        let boss = if self.boss.is_some() { 1 } else { 0 };
        boss + self.groups.iter().map(|(_, count, _)| count).sum::<u32>()
    }
}

pub fn wave_composition(wave: u32) -> WaveComposition {
    match wave {
        1 => WaveComposition::groups(vec![
            (EnemyType::Normal, 8, false),
            (EnemyType::Tank, 2, false),
        ]),
        2 => WaveComposition::boss(EnemyType::ArsenalBoss),
        3 => WaveComposition::boss(EnemyType::Boss),
        4 => WaveComposition::groups(vec![
            (EnemyType::Normal, 6, false),
            (EnemyType::Tank, 3, false),
            (EnemyType::Berserker, 2, false),
            (EnemyType::Shooter, 2, false),
            (EnemyType::Normal, 2, true),
            (EnemyType::Tank, 1, true),
        ]),
        5 => WaveComposition::groups(vec![
            (EnemyType::Normal, 8, false),
            (EnemyType::Tank, 4, false),
            (EnemyType::Berserker, 3, false),
            (EnemyType::Shooter, 3, false),
            (EnemyType::Berserker, 2, true),
        ]),
        16 => WaveComposition::boss(EnemyType::ArsenalBoss),
        n => procedural(n),
    }
}

/// Generated waves scale linearly in size. Every fifth wave shifts the
/// mix away from normals toward shooters and shielded tanks.
fn procedural(wave: u32) -> WaveComposition {
    let total = 10 + 2 * wave;
    let every_fifth = wave % 5 == 0;

    let share = |fraction: f32| (total as f32 * fraction).floor() as u32;

    let tanks = share(0.2);
    let shooters = if every_fifth { share(0.2) } else { share(0.1) };
    let berserkers = share(0.2);
    let (shielded_type, shielded) = if every_fifth {
        (EnemyType::Tank, share(0.05))
    } else {
        (EnemyType::Normal, share(0.05))
    };
    let shielded_berserkers = share(0.05);

    let rest = tanks + shooters + berserkers + shielded + shielded_berserkers;
    let normals = total - rest;

    let mut groups = vec![
        (EnemyType::Normal, normals, false),
        (EnemyType::Tank, tanks, false),
        (EnemyType::Shooter, shooters, false),
        (EnemyType::Berserker, berserkers, false),
    ];
    if shielded > 0 {
        groups.push((shielded_type, shielded, true));
    }
    if shielded_berserkers > 0 {
        groups.push((EnemyType::Berserker, shielded_berserkers, true));
    }

    WaveComposition { boss: None, groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_wave_is_normals_and_tanks() {
        let wave = wave_composition(1);
        assert!(wave.boss.is_none());
        assert_eq!(wave.total(), 10);
    }

    #[test]
    fn test_boss_waves_spawn_only_the_boss() {
        for (number, expected) in [
            (2, EnemyType::ArsenalBoss),
            (3, EnemyType::Boss),
            (16, EnemyType::ArsenalBoss),
        ] {
            let wave = wave_composition(number);
            assert_eq!(wave.boss, Some(expected));
            assert!(wave.groups.is_empty());
            assert_eq!(wave.total(), 1);
        }
    }

    #[test]
    fn test_procedural_waves_scale_with_number() {
        let wave = wave_composition(6);
        assert_eq!(wave.total(), 10 + 2 * 6);

        let later = wave_composition(30);
        assert!(later.total() > wave.total());
    }

    #[test]
    fn test_every_fifth_wave_fields_shielded_tanks() {
        let wave = wave_composition(10);
        assert!(wave
            .groups
            .iter()
            .any(|(kind, _, shielded)| *kind == EnemyType::Tank && *shielded));

        let regular = wave_composition(11);
        assert!(regular
            .groups
            .iter()
            .any(|(kind, _, shielded)| *kind == EnemyType::Normal && *shielded));
    }

    #[test]
    fn test_regular_waves_favor_berserkers_over_shooters() {
        // Wave 6: 22 enemies, berserkers at 0.2 and shooters at 0.1
        let wave = wave_composition(6);
        let count = |wanted: EnemyType| {
            wave.groups
                .iter()
                .filter(|(kind, _, shielded)| *kind == wanted && !*shielded)
                .map(|(_, n, _)| n)
                .sum::<u32>()
        };
        assert_eq!(count(EnemyType::Berserker), 4);
        assert_eq!(count(EnemyType::Shooter), 2);
    }

    #[test]
    fn test_procedural_counts_are_consistent() {
        for wave in [6, 7, 8, 9, 10, 25, 40] {
            let composition = wave_composition(wave);
            let sum: u32 = composition.groups.iter().map(|(_, n, _)| n).sum();
            assert_eq!(sum, 10 + 2 * wave, "wave {}", wave);
        }
    }
}
