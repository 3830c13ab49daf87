//! Path: game_sim/src/world/game_world.rs
//! Summary: シミュレーションコンテキスト（GameWorld）
//!
//! ゲームループが所有し、各システムへ `&mut GameWorld` で渡す。
//! グローバル状態やロックは持たない。

use super::{
    AreaZone, DirectorState, EnemyWorld, FrameEvent, GameLoopControl, PickupWorld, PlayerState,
    ProjectileWorld, Trap,
};
use crate::config::SimConfig;
use crate::meta::MetaProgress;
use game_core::constants::CELL_SIZE;
use game_core::item::{InventorySlot, ItemId};
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::SpatialHash;
use game_core::skill::SkillId;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

pub struct GameWorld {
    pub frame_id:           u32,
    pub config:             SimConfig,
    pub player:             PlayerState,
    pub enemies:            EnemyWorld,
    pub projectiles:        ProjectileWorld,
    pub zones:              Vec<AreaZone>,
    pub traps:              Vec<Trap>,
    pub pickups:            PickupWorld,
    pub director:           DirectorState,
    pub rng:                SimpleRng,
    /// 敵の近傍クエリ用（毎ステップ再構築）
    pub spatial:            SpatialHash,
    /// 近傍クエリ結果の再利用バッファ
    pub query_buf:          Vec<usize>,
    /// このフレームで発生したイベント（毎フレーム drain される）
    pub frame_events:       Vec<FrameEvent>,
    pub control:            GameLoopControl,
    /// 提示中のスキル選択肢（空でなければ選択待ち）
    pub skill_choices:      Vec<SkillId>,
    /// まだ選択肢を消化していないレベルアップ数
    pub pending_level_ups:  u32,
    /// 確定待ちのボス報酬
    pub pending_loot:       Option<ItemId>,
    /// インベントリ満杯で入れ替え判断待ちのアイテム
    pub pending_swap:       Option<ItemId>,
    /// 入れ替え判断中に届いたアイテム（到着順）
    pub swap_backlog:       VecDeque<ItemId>,
    pub unlocked_heirlooms: FxHashSet<ItemId>,
    pub elapsed_seconds:    f32,
    pub kill_count:         u32,
    /// このランで獲得したメタ通貨
    pub run_currency:       u32,
    pub game_over:          bool,
}

impl GameWorld {
    /// メタ進行（タレント・家宝）からプレイヤーを生成してランを開始する
    pub fn new(config: SimConfig, meta: &MetaProgress) -> Self {
        let config = config.validated();
        let mut player = PlayerState::new(
            meta.base_stats(),
            config.map_width * 0.5,
            config.map_height * 0.5,
            config.inventory_capacity,
        );
        for item in meta.heirlooms_in_order().into_iter().take(config.inventory_capacity) {
            player.inventory.push(InventorySlot { item, stack: 1 });
        }
        player.recalculate_stats();
        player.hp = player.stats.max_hp;

        Self {
            frame_id:           0,
            rng:                SimpleRng::new(config.seed),
            config,
            player,
            enemies:            EnemyWorld::new(),
            projectiles:        ProjectileWorld::new(),
            zones:              Vec::new(),
            traps:              Vec::new(),
            pickups:            PickupWorld::new(),
            director:           DirectorState::default(),
            spatial:            SpatialHash::new(CELL_SIZE),
            query_buf:          Vec::new(),
            frame_events:       Vec::new(),
            control:            GameLoopControl::new(),
            skill_choices:      Vec::new(),
            pending_level_ups:  0,
            pending_loot:       None,
            pending_swap:       None,
            swap_backlog:       VecDeque::new(),
            unlocked_heirlooms: meta.heirlooms.clone(),
            elapsed_seconds:    0.0,
            kill_count:         0,
            run_currency:       0,
            game_over:          false,
        }
    }

    /// スキル選択・ボス報酬の確定待ち（シミュレーションは凍結）
    pub fn awaiting_decision(&self) -> bool {
        !self.skill_choices.is_empty() || self.pending_loot.is_some()
    }

    /// 近傍クエリ用の空間ハッシュを再構築する
    pub(crate) fn rebuild_spatial(&mut self) {
        self.spatial.clear();
        for i in 0..self.enemies.len() {
            if self.enemies.alive[i] {
                self.spatial.insert(i, self.enemies.positions_x[i], self.enemies.positions_y[i]);
            }
        }
    }

    /// 死亡マーク済みのエンティティをまとめて取り除く（ティック末尾でのみ呼ぶ）
    pub(crate) fn prune(&mut self) {
        self.enemies.prune();
        self.projectiles.prune();
        self.pickups.prune();
        self.zones.retain(|z| z.alive);
        self.traps.retain(|t| t.alive);
    }

    /// ラン中の一時エンティティを全て消す（ロード時）
    pub(crate) fn clear_transient(&mut self) {
        self.enemies = EnemyWorld::new();
        self.projectiles = ProjectileWorld::new();
        self.pickups = PickupWorld::new();
        self.zones.clear();
        self.traps.clear();
        self.spatial.clear();
        self.frame_events.clear();
        self.skill_choices.clear();
        self.pending_level_ups = 0;
        self.pending_loot = None;
        self.pending_swap = None;
        self.swap_backlog.clear();
    }
}
